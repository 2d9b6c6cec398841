//! Credential persistence backends.
//!
//! A [`SessionStore`] is a small key/value area that holds the serialized
//! session. Browser stores wrap Web Storage; [`MemoryStore`] keeps the
//! session only for the lifetime of the page.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::STORAGE_PROBE_KEY;
use crate::core::error::StorageError;
use crate::utils::dom;

/// How long a signed-in credential survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceMode {
    /// `localStorage`: survives browser restarts.
    Local,
    /// `sessionStorage`: cleared when the tab closes.
    Session,
    /// Lost on reload.
    #[default]
    InMemory,
}

impl PersistenceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
            Self::InMemory => "memory",
        }
    }

    /// Store backing this mode.
    pub fn store(self) -> Box<dyn SessionStore> {
        match self {
            Self::Local => Box::new(BrowserStore::Local),
            Self::Session => Box::new(BrowserStore::Session),
            Self::InMemory => Box::new(MemoryStore::default()),
        }
    }
}

/// Key/value storage for a serialized session.
pub trait SessionStore: Send + Sync {
    fn mode(&self) -> PersistenceMode;

    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Check the store accepts writes by writing and removing a probe key.
    fn probe(&self) -> Result<(), StorageError> {
        self.write(STORAGE_PROBE_KEY, "1")?;
        self.remove(STORAGE_PROBE_KEY)
    }
}

/// Web Storage area of the current window.
///
/// Holds no handle: the `Storage` object is looked up on each call, which
/// keeps the store `Send + Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStore {
    Local,
    Session,
}

impl BrowserStore {
    fn storage(self) -> Result<web_sys::Storage, StorageError> {
        let storage = match self {
            Self::Local => dom::local_storage(),
            Self::Session => dom::session_storage(),
        };
        storage.ok_or(StorageError::Unavailable(self.mode().as_str()))
    }
}

impl SessionStore for BrowserStore {
    fn mode(&self) -> PersistenceMode {
        match self {
            Self::Local => PersistenceMode::Local,
            Self::Session => PersistenceMode::Session,
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage()?;
        storage
            .get_item(key)
            .map_err(|_| StorageError::Unavailable(self.mode().as_str()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::WriteFailed(self.mode().as_str()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| StorageError::RemoveFailed(self.mode().as_str()))
    }
}

/// In-memory store, the initial persistence before bootstrap picks another.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn mode(&self) -> PersistenceMode {
        PersistenceMode::InMemory
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Unavailable("memory"))?;
        Ok(items.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::WriteFailed("memory"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::RemoveFailed("memory"))?;
        items.remove(key);
        Ok(())
    }
}
