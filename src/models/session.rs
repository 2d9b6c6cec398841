use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_REFRESH_BUFFER_MS};

/// Response body of `accounts:signInWithPassword` and `accounts:signUp`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds, sent as a decimal string.
    pub expires_in: String,
}

/// Response body of the Secure Token `token` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub user_id: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

/// A signed-in user's credentials.
///
/// Serialized as JSON into the configured persistence store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Absolute expiry, milliseconds since the Unix epoch.
    pub expires_at_ms: f64,
}

fn parse_lifetime_ms(expires_in: &str) -> f64 {
    let secs = match expires_in.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => secs,
        _ => {
            log::warn!(
                "unreadable token lifetime {:?}, assuming {}s",
                expires_in,
                DEFAULT_TOKEN_LIFETIME_SECS
            );
            DEFAULT_TOKEN_LIFETIME_SECS
        }
    };
    secs * 1000.0
}

impl Session {
    pub fn from_sign_in(resp: SignInResponse, now_ms: f64) -> Self {
        Self {
            expires_at_ms: now_ms + parse_lifetime_ms(&resp.expires_in),
            uid: resp.local_id,
            email: resp.email,
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
        }
    }

    /// Apply refreshed tokens. Email is not part of the refresh response and is kept.
    pub fn refreshed(&self, resp: RefreshResponse, now_ms: f64) -> Self {
        Self {
            uid: resp.user_id,
            email: self.email.clone(),
            id_token: resp.id_token,
            refresh_token: resp.refresh_token,
            expires_at_ms: now_ms + parse_lifetime_ms(&resp.expires_in),
        }
    }

    /// True once the token is within the refresh buffer of its expiry.
    pub fn needs_refresh(&self, now_ms: f64) -> bool {
        now_ms + TOKEN_REFRESH_BUFFER_MS >= self.expires_at_ms
    }

    /// Milliseconds until a refresh should happen (zero if overdue).
    pub fn refresh_delay_ms(&self, now_ms: f64) -> u32 {
        let delay = self.expires_at_ms - TOKEN_REFRESH_BUFFER_MS - now_ms;
        if delay <= 0.0 {
            0
        } else {
            delay.min(f64::from(u32::MAX)) as u32
        }
    }
}
