//! Backend client bootstrap.
//!
//! The backend client is a process-wide singleton created by [`bootstrap`]
//! during startup and read through [`get`] afterwards. It lives for the rest
//! of the page; there is no teardown.

use std::sync::OnceLock;

use crate::config::FirebaseConfig;
use crate::core::firestore::FirestoreClient;
use crate::core::identity::IdentityClient;
use crate::core::persistence::SessionStore;
use crate::utils::diagnostics;

/// Handles into the hosted backend project.
pub struct Backend {
    config: FirebaseConfig,
    auth: IdentityClient,
    firestore: FirestoreClient,
}

impl Backend {
    fn new(config: FirebaseConfig) -> Self {
        log::info!("initializing backend client for project {}", config.project_id);
        Self {
            auth: IdentityClient::new(config.api_key.clone()),
            firestore: FirestoreClient::new(config.project_id.clone()),
            config,
        }
    }

    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    pub fn auth(&self) -> &IdentityClient {
        &self.auth
    }

    pub fn firestore(&self) -> &FirestoreClient {
        &self.firestore
    }
}

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// The backend client, if startup created one.
pub fn get() -> Option<&'static Backend> {
    BACKEND.get()
}

/// Ask the auth client to persist credentials in `store`.
///
/// A failure is written to the diagnostic stream once and otherwise
/// ignored: the client keeps its previous persistence. Returns whether the
/// store was applied.
pub fn configure_persistence(auth: &IdentityClient, store: Box<dyn SessionStore>) -> bool {
    let mode = store.mode();
    match auth.set_persistence(store) {
        Ok(()) => {
            log::debug!("auth persistence set to {}", mode.as_str());
            true
        }
        Err(e) => {
            diagnostics::error(format!("Error setting auth persistence: {}", e));
            false
        }
    }
}

/// Create the client in `cell` (first call only) and configure persistence.
///
/// Later calls return the existing client and ignore their arguments.
pub fn bootstrap_in<'a>(
    cell: &'a OnceLock<Backend>,
    config: FirebaseConfig,
    store: Box<dyn SessionStore>,
) -> &'a Backend {
    let mut created = false;
    let backend = cell.get_or_init(|| {
        created = true;
        Backend::new(config)
    });
    if created {
        configure_persistence(backend.auth(), store);
    }
    backend
}

/// Create the process-wide client and configure persistence.
pub fn bootstrap(config: FirebaseConfig, store: Box<dyn SessionStore>) -> &'static Backend {
    bootstrap_in(&BACKEND, config, store)
}
