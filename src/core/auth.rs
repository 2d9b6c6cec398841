//! Reactive auth store.
//!
//! Wraps [`AuthState`] in a signal shared through the app context and runs
//! the sign-in, sign-up, sign-out and session restore flows against the
//! backend. Components read `is_logged_in` and `email`; only the flows here
//! write the state, and only through [`AuthState`] transitions.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::core::backend::{self, Backend};
use crate::core::error::{AuthError, TransitionError};
use crate::core::identity::IdentityClient;
use crate::models::{AuthState, Session};
use crate::utils::{diagnostics, dom, validate_credentials};

/// Which credential request the login form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialAction {
    SignIn,
    SignUp,
}

/// Shared auth state with mediated transitions.
///
/// `Copy` because both fields are arena handles.
#[derive(Clone, Copy)]
pub struct AuthStore {
    state: RwSignal<AuthState>,
    /// Bumped on every session change so stale refresh loops stop.
    generation: StoredValue<u64>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
            generation: StoredValue::new(0),
        }
    }

    /// Read-only view of the state.
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with(AuthState::is_logged_in)
    }

    pub fn email(&self) -> String {
        self.state.with(|s| s.email().to_string())
    }

    pub fn uid(&self) -> Option<String> {
        self.state.with(|s| s.uid().map(str::to_string))
    }

    /// Apply a transition; a rejected one is logged and notifies nobody.
    fn transition(&self, f: impl FnOnce(&mut AuthState) -> Result<(), TransitionError>) -> bool {
        let mut applied = false;
        self.state.maybe_update(|state| match f(state) {
            Ok(()) => {
                applied = true;
                true
            }
            Err(e) => {
                log::warn!("auth transition rejected: {}", e);
                false
            }
        });
        applied
    }

    /// Record a failed attempt that never reached the backend.
    fn reject(&self, reason: String) {
        if self.transition(AuthState::begin) {
            self.transition(|s| s.fail(reason));
        }
    }

    fn bump_generation(&self) -> u64 {
        self.generation.update_value(|g| *g += 1);
        self.generation.get_value()
    }

    /// Sign in or create an account, calling `on_success` once signed in.
    pub fn submit(
        &self,
        email: String,
        password: String,
        action: CredentialAction,
        on_success: impl FnOnce() + 'static,
    ) {
        let email = email.trim().to_string();
        if let Err(e) = validate_credentials(&email, &password, action == CredentialAction::SignUp)
        {
            self.reject(e.to_string());
            return;
        }
        let Some(backend) = backend::get() else {
            self.reject(AuthError::NotConfigured.to_string());
            return;
        };
        if !self.transition(AuthState::begin) {
            return;
        }

        let auth = backend.auth();
        let store = *self;
        dom::spawn(async move {
            let result = match action {
                CredentialAction::SignIn => auth.sign_in_with_password(&email, &password).await,
                CredentialAction::SignUp => auth.sign_up(&email, &password).await,
            };
            match result {
                Ok(session) => {
                    log::info!("signed in as {}", session.uid);
                    if store.transition(|s| s.complete(session.uid.clone(), session.email.clone()))
                    {
                        store.schedule_refresh(auth, &session);
                        on_success();
                    }
                }
                Err(e) => {
                    log::warn!("sign-in failed: {}", e);
                    store.transition(|s| s.fail(e.to_string()));
                }
            }
        });
    }

    /// Sign out locally and forget the persisted session.
    pub fn sign_out(&self) {
        self.end_session(backend::get().map(Backend::auth));
    }

    fn end_session(&self, auth: Option<&IdentityClient>) {
        self.bump_generation();
        if let Some(auth) = auth
            && let Err(e) = auth.sign_out()
        {
            diagnostics::warn(format!("failed to clear stored session: {}", e));
        }
        self.state.update(AuthState::sign_out);
    }

    /// Pick up a session persisted by a previous page load.
    pub fn restore(&self) {
        if let Some(backend) = backend::get() {
            self.restore_from(backend.auth());
        }
    }

    /// Restore from `auth`'s store.
    ///
    /// A token close to expiry is refreshed before the user counts as signed in.
    fn restore_from(&self, auth: &'static IdentityClient) {
        let session = match auth.load_persisted() {
            Ok(Some(session)) => session,
            Ok(None) => return,
            Err(e) => {
                diagnostics::warn(format!("discarding stored session: {}", e));
                return;
            }
        };

        if !session.needs_refresh(dom::now_ms()) {
            if self.transition(|s| s.restore(session.uid.clone(), session.email.clone())) {
                log::info!("restored session for {}", session.uid);
                self.schedule_refresh(auth, &session);
            }
            return;
        }

        if !self.transition(AuthState::begin) {
            return;
        }
        let store = *self;
        dom::spawn(async move {
            match auth.refresh().await {
                Ok(session) => {
                    if store.transition(|s| s.complete(session.uid.clone(), session.email.clone()))
                    {
                        store.schedule_refresh(auth, &session);
                    }
                }
                Err(e) => store.expire(auth, e),
            }
        });
    }

    /// Drop a session whose tokens can no longer be refreshed.
    fn expire(&self, auth: &IdentityClient, err: AuthError) {
        diagnostics::warn(format!("session refresh failed: {}", err));
        self.end_session(Some(auth));
    }

    /// Refresh the ID token shortly before it expires, for as long as this
    /// session stays current.
    fn schedule_refresh(&self, auth: &'static IdentityClient, session: &Session) {
        let generation = self.bump_generation();
        let delay = session.refresh_delay_ms(dom::now_ms());
        let store = *self;

        dom::spawn(async move {
            TimeoutFuture::new(delay).await;
            if store.generation.get_value() != generation {
                return;
            }
            match auth.refresh().await {
                Ok(session) if store.generation.get_value() == generation => {
                    log::debug!("refreshed ID token for {}", session.uid);
                    store.schedule_refresh(auth, &session);
                }
                Ok(_) => {}
                Err(e) => store.expire(auth, e),
            }
        });
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::config::session_key;
    use crate::core::error::AuthErrorCode;
    use crate::core::persistence::{MemoryStore, SessionStore};

    fn session_json(expires_at_ms: f64) -> String {
        serde_json::to_string(&Session {
            uid: "u1".to_string(),
            email: "ada@example.com".to_string(),
            id_token: "id-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_at_ms,
        })
        .unwrap()
    }

    /// Identity client whose store already holds `entry`.
    fn client_with(entry: Option<String>) -> &'static IdentityClient {
        let store = MemoryStore::default();
        if let Some(json) = entry {
            store.write(&session_key("key"), &json).unwrap();
        }
        let client = IdentityClient::new("key");
        client.set_persistence(Box::new(store)).unwrap();
        Box::leak(Box::new(client))
    }

    #[test]
    fn test_new_store_is_signed_out() {
        Owner::new().with(|| {
            let store = AuthStore::new();
            assert!(!store.is_logged_in());
            assert_eq!(store.email(), "");
            assert_eq!(store.uid(), None);
            assert_eq!(store.state().get_untracked(), AuthState::SignedOut);
        });
    }

    #[test]
    fn test_invalid_input_fails_without_network() {
        Owner::new().with(|| {
            let store = AuthStore::new();
            store.submit(
                "not-an-email".to_string(),
                "secret".to_string(),
                CredentialAction::SignIn,
                || panic!("must not succeed"),
            );
            assert_eq!(
                store.state().get_untracked().error(),
                Some("That email address is not valid.")
            );
            assert!(!store.is_logged_in());
        });
    }

    #[test]
    fn test_rejected_transition_leaves_state() {
        Owner::new().with(|| {
            let store = AuthStore::new();
            assert!(!store.transition(|s| s.complete("u1".to_string(), "a@b.c".to_string())));
            assert_eq!(store.state().get_untracked(), AuthState::SignedOut);

            assert!(store.transition(|s| s.restore("u1".to_string(), "a@b.c".to_string())));
            assert!(store.is_logged_in());
            assert_eq!(store.email(), "a@b.c");

            store.sign_out();
            assert!(!store.is_logged_in());
            assert_eq!(store.email(), "");
        });
    }

    #[test]
    fn test_sign_out_invalidates_refresh_generation() {
        Owner::new().with(|| {
            let store = AuthStore::new();
            let before = store.generation.get_value();
            store.sign_out();
            assert_eq!(store.generation.get_value(), before + 1);
        });
    }

    #[test]
    fn test_restore_unexpired_session() {
        Owner::new().with(|| {
            let auth = client_with(Some(session_json(dom::now_ms() + 3_600_000.0)));
            let store = AuthStore::new();
            let before = store.generation.get_value();

            store.restore_from(auth);
            assert!(store.is_logged_in());
            assert_eq!(store.email(), "ada@example.com");
            assert_eq!(store.uid().as_deref(), Some("u1"));
            assert_eq!(auth.id_token().as_deref(), Some("id-1"));
            // A refresh was scheduled for the restored session
            assert_eq!(store.generation.get_value(), before + 1);
        });
    }

    #[test]
    fn test_restore_expiring_session_waits_for_refresh() {
        Owner::new().with(|| {
            let auth = client_with(Some(session_json(dom::now_ms() + 1_000.0)));
            let store = AuthStore::new();

            store.restore_from(auth);
            assert!(store.state().get_untracked().is_pending());
            assert!(!store.is_logged_in());
        });
    }

    #[test]
    fn test_restore_corrupt_entry_is_discarded() {
        Owner::new().with(|| {
            diagnostics::clear();
            let auth = client_with(Some("{not json".to_string()));
            let store = AuthStore::new();

            store.restore_from(auth);
            assert_eq!(store.state().get_untracked(), AuthState::SignedOut);
            assert_eq!(diagnostics::count(Level::Warn), 1);
            assert!(diagnostics::snapshot()[0]
                .message
                .starts_with("discarding stored session"));
            assert_eq!(auth.load_persisted(), Ok(None));
        });
    }

    #[test]
    fn test_restore_without_stored_session() {
        Owner::new().with(|| {
            diagnostics::clear();
            let store = AuthStore::new();
            store.restore_from(client_with(None));
            assert_eq!(store.state().get_untracked(), AuthState::SignedOut);
            assert!(diagnostics::snapshot().is_empty());
        });
    }

    #[test]
    fn test_restore_without_backend_stays_signed_out() {
        Owner::new().with(|| {
            let store = AuthStore::new();
            store.restore();
            assert_eq!(store.state().get_untracked(), AuthState::SignedOut);
        });
    }

    #[test]
    fn test_failed_refresh_clears_session() {
        Owner::new().with(|| {
            let auth = client_with(Some(session_json(dom::now_ms() + 3_600_000.0)));
            let store = AuthStore::new();
            store.restore_from(auth);
            assert!(store.is_logged_in());

            diagnostics::clear();
            let generation = store.generation.get_value();
            store.expire(auth, AuthError::Rejected(AuthErrorCode::InvalidRefreshToken));

            assert_eq!(store.state().get_untracked(), AuthState::SignedOut);
            assert_eq!(auth.current_session(), None);
            assert_eq!(auth.load_persisted(), Ok(None));
            assert_eq!(diagnostics::count(Level::Warn), 1);
            assert!(store.generation.get_value() > generation);
        });
    }
}
