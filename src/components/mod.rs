//! UI components built with Leptos.
//!
//! - [`router`] - History-based routing (main entry point)
//! - [`link`] - In-app links that navigate without reloading
//! - [`nav`] - Navigation bar with session status
//! - [`views`] - One component per route
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod icons;
pub mod link;
pub mod nav;
pub mod router;
pub mod views;

pub use link::Link;
pub use router::AppRouter;
