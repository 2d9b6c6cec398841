//! Core logic for the application.
//!
//! This module provides:
//! - [`backend`] - One-time backend client bootstrap and handles
//! - [`identity`] - Email/password auth and token refresh
//! - [`firestore`] - Document reads
//! - [`persistence`] - Where sessions are stored
//! - [`AuthStore`] - Reactive auth state shared with components

mod auth;
pub mod backend;
pub mod error;
pub mod firestore;
pub mod identity;
pub mod persistence;

pub use auth::{AuthStore, CredentialAction};
