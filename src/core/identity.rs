//! Identity Toolkit client.
//!
//! Email/password authentication over the Identity Toolkit and Secure Token
//! REST APIs. The client owns the current [`Session`] and writes it through
//! to the configured [`SessionStore`] so it survives reloads.

use std::sync::Mutex;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::config::{IDENTITY_TOOLKIT_URL, SECURE_TOKEN_URL, session_key};
use crate::core::error::{AuthError, AuthErrorCode, FetchError, StorageError};
use crate::core::persistence::{MemoryStore, PersistenceMode, SessionStore};
use crate::models::{RefreshResponse, Session, SignInResponse};
use crate::utils::{dom, fetch};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turn a failed request into an auth error, decoding the backend's error
/// payload when there is one.
fn map_fetch_error(err: FetchError) -> AuthError {
    if let FetchError::HttpError { body, .. } = &err
        && let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body)
    {
        return AuthError::Rejected(AuthErrorCode::parse(&envelope.error.message));
    }
    AuthError::Fetch(err)
}

/// Form body of a Secure Token refresh request.
fn refresh_form(refresh_token: &str) -> String {
    format!(
        "grant_type=refresh_token&refresh_token={}",
        utf8_percent_encode(refresh_token, NON_ALPHANUMERIC)
    )
}

/// Authentication handle of the backend client.
pub struct IdentityClient {
    api_key: String,
    store: Mutex<Box<dyn SessionStore>>,
    current: Mutex<Option<Session>>,
}

impl IdentityClient {
    /// New client with in-memory persistence.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            store: Mutex::new(Box::new(MemoryStore::default())),
            current: Mutex::new(None),
        }
    }

    fn session_key(&self) -> String {
        session_key(&self.api_key)
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{}?key={}", IDENTITY_TOOLKIT_URL, method, self.api_key)
    }

    pub fn persistence(&self) -> PersistenceMode {
        self.store
            .lock()
            .map(|store| store.mode())
            .unwrap_or_default()
    }

    /// Switch the persistence store.
    ///
    /// The new store must accept writes. The current session, if any, moves
    /// to the new store. On error the previous store stays in place.
    pub fn set_persistence(&self, next: Box<dyn SessionStore>) -> Result<(), StorageError> {
        next.probe()?;

        let key = self.session_key();
        if let Some(session) = self.current_session() {
            let json = serde_json::to_string(&session)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?;
            next.write(&key, &json)?;
        }

        let mut store = self
            .store
            .lock()
            .map_err(|_| StorageError::Unavailable(next.mode().as_str()))?;
        if store.mode() != next.mode() {
            let _ = store.remove(&key);
        }
        *store = next;
        Ok(())
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current.lock().ok().and_then(|current| current.clone())
    }

    /// ID token to authorize document requests.
    pub fn id_token(&self) -> Option<String> {
        self.current_session().map(|s| s.id_token)
    }

    /// Persist `session`, then make it current.
    ///
    /// A session the store refuses never becomes current.
    fn save(&self, session: Session) -> Result<Session, StorageError> {
        let json =
            serde_json::to_string(&session).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        {
            let store = self
                .store
                .lock()
                .map_err(|_| StorageError::Unavailable("session"))?;
            store.write(&self.session_key(), &json)?;
        }
        if let Ok(mut current) = self.current.lock() {
            *current = Some(session.clone());
        }
        Ok(session)
    }

    /// Forget the current session, in memory and in the store.
    pub fn sign_out(&self) -> Result<(), StorageError> {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
        let store = self
            .store
            .lock()
            .map_err(|_| StorageError::Unavailable("session"))?;
        store.remove(&self.session_key())
    }

    /// Read a session left in the store by a previous page load.
    ///
    /// A corrupt entry is removed and reported.
    pub fn load_persisted(&self) -> Result<Option<Session>, StorageError> {
        let key = self.session_key();
        let store = self
            .store
            .lock()
            .map_err(|_| StorageError::Unavailable("session"))?;
        let Some(json) = store.read(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Session>(&json) {
            Ok(session) => {
                drop(store);
                if let Ok(mut current) = self.current.lock() {
                    *current = Some(session.clone());
                }
                Ok(Some(session))
            }
            Err(e) => {
                let _ = store.remove(&key);
                Err(StorageError::Corrupt(e.to_string()))
            }
        }
    }

    async fn password_request(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let resp: SignInResponse = fetch::post_json(&self.endpoint(method), &body)
            .await
            .map_err(map_fetch_error)?;
        Ok(self.save(Session::from_sign_in(resp, dom::now_ms()))?)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        self.password_request("signInWithPassword", email, password)
            .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.password_request("signUp", email, password).await
    }

    /// Exchange the refresh token for a new ID token.
    pub async fn refresh(&self) -> Result<Session, AuthError> {
        let session = self.current_session().ok_or(AuthError::NotSignedIn)?;
        let url = format!("{}?key={}", SECURE_TOKEN_URL, self.api_key);
        let resp: RefreshResponse = fetch::post_form(&url, &refresh_form(&session.refresh_token))
            .await
            .map_err(map_fetch_error)?;
        Ok(self.save(session.refreshed(resp, dom::now_ms()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn mode(&self) -> PersistenceMode {
            PersistenceMode::Local
        }
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("local"))
        }
        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed("local"))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::RemoveFailed("local"))
        }
    }

    /// Memory store reporting itself as local storage.
    #[derive(Default)]
    struct FakeLocal(MemoryStore);

    impl SessionStore for FakeLocal {
        fn mode(&self) -> PersistenceMode {
            PersistenceMode::Local
        }
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }
        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.write(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    /// Accepts the storage probe but refuses to hold a session.
    #[derive(Default)]
    struct FullStore(MemoryStore);

    impl SessionStore for FullStore {
        fn mode(&self) -> PersistenceMode {
            PersistenceMode::Local
        }
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }
        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == crate::config::STORAGE_PROBE_KEY {
                self.0.write(key, value)
            } else {
                Err(StorageError::WriteFailed("local"))
            }
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    fn session() -> Session {
        Session {
            uid: "u1".to_string(),
            email: "ada@example.com".to_string(),
            id_token: "id-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_at_ms: 1_000.0,
        }
    }

    #[test]
    fn test_starts_in_memory_and_signed_out() {
        let client = IdentityClient::new("key");
        assert_eq!(client.persistence(), PersistenceMode::InMemory);
        assert_eq!(client.current_session(), None);
        assert_eq!(client.id_token(), None);
        assert_eq!(client.load_persisted(), Ok(None));
    }

    #[test]
    fn test_set_persistence_rejects_broken_store() {
        let client = IdentityClient::new("key");
        let err = client.set_persistence(Box::new(BrokenStore)).unwrap_err();
        assert_eq!(err, StorageError::WriteFailed("local"));
        assert_eq!(client.persistence(), PersistenceMode::InMemory);
    }

    #[test]
    fn test_set_persistence_migrates_session() {
        let client = IdentityClient::new("key");
        client.save(session()).unwrap();

        client.set_persistence(Box::new(FakeLocal::default())).unwrap();
        assert_eq!(client.persistence(), PersistenceMode::Local);

        // A fresh read from the new store sees the migrated session
        assert_eq!(client.load_persisted(), Ok(Some(session())));
    }

    #[test]
    fn test_refused_save_leaves_no_current_session() {
        let client = IdentityClient::new("key");
        client.set_persistence(Box::new(FullStore::default())).unwrap();

        assert_eq!(client.save(session()), Err(StorageError::WriteFailed("local")));
        assert_eq!(client.current_session(), None);
        assert_eq!(client.id_token(), None);
    }

    #[test]
    fn test_refused_save_keeps_previous_session() {
        let client = IdentityClient::new("key");
        client.save(session()).unwrap();
        client.set_persistence(Box::new(FullStore::default())).unwrap_err();

        // Migration failed, so the memory store and session are untouched
        assert_eq!(client.persistence(), PersistenceMode::InMemory);
        assert_eq!(client.id_token().as_deref(), Some("id-1"));
    }

    #[test]
    fn test_sign_out_clears_store() {
        let client = IdentityClient::new("key");
        client.save(session()).unwrap();
        assert_eq!(client.id_token().as_deref(), Some("id-1"));

        client.sign_out().unwrap();
        assert_eq!(client.current_session(), None);
        assert_eq!(client.load_persisted(), Ok(None));
    }

    #[test]
    fn test_corrupt_session_is_removed() {
        let client = IdentityClient::new("key");
        {
            let store = client.store.lock().unwrap();
            store.write(&session_key("key"), "{not json").unwrap();
        }
        assert!(matches!(client.load_persisted(), Err(StorageError::Corrupt(_))));
        assert_eq!(client.load_persisted(), Ok(None));
    }

    #[test]
    fn test_error_payload_mapping() {
        let err = map_fetch_error(FetchError::HttpError {
            status: 400,
            body: r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#.to_string(),
        });
        assert_eq!(err, AuthError::Rejected(AuthErrorCode::EmailExists));

        let err = map_fetch_error(FetchError::HttpError {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        });
        assert!(matches!(err, AuthError::Fetch(FetchError::HttpError { status: 502, .. })));

        assert_eq!(
            map_fetch_error(FetchError::Timeout),
            AuthError::Fetch(FetchError::Timeout)
        );
    }

    #[test]
    fn test_refresh_form_escapes_token() {
        assert_eq!(
            refresh_form("AbC1"),
            "grant_type=refresh_token&refresh_token=AbC1"
        );
        assert_eq!(
            refresh_form("a b/c+d="),
            "grant_type=refresh_token&refresh_token=a%20b%2Fc%2Bd%3D"
        );
    }

    #[test]
    fn test_endpoints() {
        let client = IdentityClient::new("key");
        assert_eq!(
            client.endpoint("signUp"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=key"
        );
    }
}
