//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`AppRoute`], [`RouteTable`], [`RouteMatch`] - History-based navigation
//! - [`AuthState`] - Sign-in state of the current visitor
//! - [`Session`] - Persisted credentials and token expiry
//! - [`Document`], [`Folder`], [`SavedPost`], [`UserProfile`] - Firestore records

mod auth;
pub mod document;
mod route;
mod session;

pub use auth::AuthState;
pub use document::{
    Document, Folder, FolderAccess, FromDocument, ListDocumentsResponse, SavedPost, UserProfile,
};
pub use route::{AppRoute, RouteDef, RouteMatch, RouteName, RouteTable};
pub use session::{RefreshResponse, Session, SignInResponse};
