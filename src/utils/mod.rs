//! Utility modules for web, DOM, and diagnostics.
//!
//! Provides:
//! - [`dom`] - Window, Web Storage and History access
//! - [`fetch`] - JSON requests with timeout
//! - [`diagnostics`] - Logged and buffered error records
//! - [`markdown_to_html`] - Markdown rendering with XSS sanitization
//! - [`is_valid_email`] - Login form validation

pub mod diagnostics;
pub mod dom;
pub mod fetch;
mod markdown;
mod validate;

pub use markdown::markdown_to_html;
pub use validate::{is_valid_email, validate_credentials};
