//! Application configuration.
//!
//! Centralizes configuration constants used throughout the application and
//! the backend project settings ([`FirebaseConfig`]). Backend keys are never
//! compiled in from source: they come from the host page or from build-time
//! environment variables.

use serde::Deserialize;

use crate::core::error::ConfigError;
use crate::core::persistence::PersistenceMode;
use crate::models::RouteTable;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the navigation bar.
pub const APP_NAME: &str = "folio";

// =============================================================================
// Routing
// =============================================================================

/// Deployment base path, e.g. `/app/` when served from a subdirectory.
pub const BASE_PATH: &str = match option_env!("FOLIO_BASE_PATH") {
    Some(path) => path,
    None => "/",
};

/// Route table served by the router.
pub const ROUTE_TABLE: RouteTable = RouteTable::Expanded;

// =============================================================================
// Backend Endpoints
// =============================================================================

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";
pub const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Firestore collection names.
pub mod collections {
    pub const USERS: &str = "users";
    /// Subcollection of a user document.
    pub const SAVED_POSTS: &str = "savedPosts";
    pub const FOLDERS: &str = "folders";
}

/// Maximum documents requested per collection listing.
pub const LIST_PAGE_SIZE: u32 = 100;

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10_000;

// =============================================================================
// Session Configuration
// =============================================================================

/// Where credentials are kept across page loads.
pub const PERSISTENCE: PersistenceMode = PersistenceMode::Local;

/// Refresh the ID token this long before it expires.
pub const TOKEN_REFRESH_BUFFER_MS: f64 = 30_000.0;

/// Token lifetime assumed when the backend sends an unreadable `expiresIn`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: f64 = 3_600.0;

/// Key written and removed to check that a storage area accepts writes.
pub const STORAGE_PROBE_KEY: &str = "__sak";

/// Storage key for the persisted session of a project.
pub fn session_key(api_key: &str) -> String {
    format!("firebase:authUser:{}:[DEFAULT]", api_key)
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Number of diagnostic records kept in memory.
pub const MAX_DIAGNOSTICS: usize = 50;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// Backend Project Configuration
// =============================================================================

/// Id of the `<script type="application/toml">` element holding the project config.
pub const CONFIG_ELEMENT_ID: &str = "firebase-config";

/// Web app settings of the backend project.
///
/// Field names accept both the snake_case TOML spelling and the camelCase
/// spelling used by the Firebase console snippet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirebaseConfig {
    #[serde(alias = "apiKey")]
    pub api_key: String,
    #[serde(alias = "authDomain")]
    pub auth_domain: String,
    #[serde(alias = "projectId")]
    pub project_id: String,
    #[serde(default, alias = "storageBucket")]
    pub storage_bucket: String,
    #[serde(default, alias = "messagingSenderId")]
    pub messaging_sender_id: String,
    #[serde(default, alias = "appId")]
    pub app_id: String,
    #[serde(default, alias = "measurementId")]
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `FIREBASE_*` variables looked up by `lookup`.
    pub fn from_env_with(
        lookup: impl Fn(&'static str) -> Option<&'static str>,
    ) -> Result<Self, ConfigError> {
        let get = |name| lookup(name).unwrap_or_default().to_string();
        if lookup("FIREBASE_API_KEY").is_none() {
            return Err(ConfigError::NotFound);
        }
        let config = Self {
            api_key: get("FIREBASE_API_KEY"),
            auth_domain: get("FIREBASE_AUTH_DOMAIN"),
            project_id: get("FIREBASE_PROJECT_ID"),
            storage_bucket: get("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: get("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: get("FIREBASE_APP_ID"),
            measurement_id: lookup("FIREBASE_MEASUREMENT_ID")
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build from variables captured at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| match name {
            "FIREBASE_API_KEY" => option_env!("FIREBASE_API_KEY"),
            "FIREBASE_AUTH_DOMAIN" => option_env!("FIREBASE_AUTH_DOMAIN"),
            "FIREBASE_PROJECT_ID" => option_env!("FIREBASE_PROJECT_ID"),
            "FIREBASE_STORAGE_BUCKET" => option_env!("FIREBASE_STORAGE_BUCKET"),
            "FIREBASE_MESSAGING_SENDER_ID" => option_env!("FIREBASE_MESSAGING_SENDER_ID"),
            "FIREBASE_APP_ID" => option_env!("FIREBASE_APP_ID"),
            "FIREBASE_MEASUREMENT_ID" => option_env!("FIREBASE_MEASUREMENT_ID"),
            _ => None,
        })
    }

    /// Load from the host page, falling back to the build environment.
    pub fn load() -> Result<Self, ConfigError> {
        match crate::utils::dom::element_text(CONFIG_ELEMENT_ID) {
            Some(text) => Self::from_toml(&text),
            None => Self::from_build_env(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("api_key", &self.api_key),
            ("auth_domain", &self.auth_domain),
            ("project_id", &self.project_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field));
            }
        }
        Ok(())
    }
}
