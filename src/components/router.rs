//! Application router component.
//!
//! Handles URL-based routing with the History API. The route signal in
//! [`AppContext`] is the source of truth; in-app links push history entries
//! and `popstate` (back/forward) re-reads the URL.
//!
//! No route is guarded here: every view decides for itself what a signed-out
//! visitor may see.

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::components::nav::Nav;
use crate::components::views::{
    FolderView, HomeView, LoginView, NotFoundView, SavedPostsView, UserProfileView,
};
use crate::config::APP_NAME;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Page title for a route.
fn page_title(route: &AppRoute) -> String {
    let section = match route {
        AppRoute::Home => return APP_NAME.to_string(),
        AppRoute::Login => "Sign in",
        AppRoute::UserProfile { .. } => "Profile",
        AppRoute::SavedPosts => "Saved posts",
        AppRoute::Folder { .. } => "Folder",
        AppRoute::SharedFolder { .. } => "Shared folder",
        AppRoute::NotFound { .. } => "Not found",
    };
    format!("{} · {}", section, APP_NAME)
}

/// Main application router.
///
/// Renders the navigation bar and exactly one view for the current route:
/// - `/` → Home
/// - `/login` → Login
/// - `/users/:userId` → UserProfile
/// - `/savedposts` → SavedPosts
/// - `/folder/:id` → Folder
/// - `/shared-folder/:id` → SharedFolder
/// - anything else → NotFound
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let route = ctx.route;

    // Set up popstate listener (runs once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let closure = Closure::wrap(Box::new(move || {
            route.set(AppRoute::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    Effect::new(move || {
        document().set_title(&route.with(page_title));
    });

    view! {
        <div class=css::layout>
            <Nav />
            <main class=css::main>
                {move || match route.get() {
                    AppRoute::Home => view! { <HomeView /> }.into_any(),
                    AppRoute::Login => view! { <LoginView /> }.into_any(),
                    AppRoute::UserProfile { user_id } => {
                        view! { <UserProfileView user_id=user_id /> }.into_any()
                    }
                    AppRoute::SavedPosts => view! { <SavedPostsView /> }.into_any(),
                    AppRoute::Folder { id } => {
                        view! { <FolderView id=id shared=false /> }.into_any()
                    }
                    AppRoute::SharedFolder { id } => {
                        view! { <FolderView id=id shared=true /> }.into_any()
                    }
                    AppRoute::NotFound { path } => view! { <NotFoundView path=path /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_titles() {
        assert_eq!(page_title(&AppRoute::Home), "folio");
        assert_eq!(page_title(&AppRoute::Login), "Sign in · folio");
        assert_eq!(
            page_title(&AppRoute::NotFound {
                path: "/x".to_string()
            }),
            "Not found · folio"
        );
    }
}
