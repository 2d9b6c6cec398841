//! Route views.
//!
//! One component per route. Views that read documents share the loaders and
//! the error notice defined here.

mod folder;
mod home;
mod login;
mod not_found;
mod profile;
mod saved_posts;

pub use folder::FolderView;
pub use home::HomeView;
pub use login::LoginView;
pub use not_found::NotFoundView;
pub use profile::UserProfileView;
pub use saved_posts::SavedPostsView;

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;
use crate::core::backend;
use crate::core::error::FirestoreError;
use crate::models::FromDocument;

stylance::import_crate_style!(css, "src/components/views/views.module.css");

/// Fetch one decoded document with the current user's ID token.
async fn load_document<T: FromDocument>(path: String) -> Result<T, FirestoreError> {
    let backend = backend::get().ok_or(FirestoreError::NotConfigured)?;
    let token = backend.auth().id_token();
    backend.firestore().get(&path, token.as_deref()).await
}

/// Fetch and decode every document of a collection.
async fn load_collection<T: FromDocument>(path: String) -> Result<Vec<T>, FirestoreError> {
    let backend = backend::get().ok_or(FirestoreError::NotConfigured)?;
    let token = backend.auth().id_token();
    backend.firestore().list(&path, token.as_deref()).await
}

/// Inline message for a failed document read.
#[component]
fn ErrorNotice(error: FirestoreError, #[prop(optional)] what: &'static str) -> impl IntoView {
    let message = match &error {
        FirestoreError::NotFound(_) if !what.is_empty() => format!("No such {}.", what),
        FirestoreError::PermissionDenied => "You don't have permission to view this.".to_string(),
        other => other.to_string(),
    };
    view! {
        <p class=css::error>
            <Icon icon=ic::WARNING />
            <span>{message}</span>
        </p>
    }
}
