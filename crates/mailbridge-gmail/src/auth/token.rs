//! `OAuth2` token model and file-backed persistence.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

/// `OAuth2` access token with refresh metadata, as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Access token string.
    pub access_token: String,
    /// Refresh token for obtaining new access tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiration time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Scope granted by the authorization server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl StoredToken {
    /// Builds a stored token from a token-endpoint response.
    ///
    /// The server omits the refresh token on refresh grants, so the
    /// previous one is carried over.
    #[must_use]
    pub fn from_response(response: TokenResponse, previous_refresh: Option<String>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: response
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(i64::from(secs))),
            scope: response.scope,
        }
    }

    /// Checks if the token is expired (with 60 second buffer).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + Duration::seconds(60) >= exp)
    }

    /// Returns true if the token is valid (not expired).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

/// Token response from the `OAuth2` token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: Option<u32>,
    /// Refresh token, if issued.
    pub refresh_token: Option<String>,
    /// Scope granted.
    pub scope: Option<String>,
}

/// File-backed token store.
///
/// Persistence failures are never fatal: losing the store only means the
/// user authorizes again on the next run.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the stored token. Missing or corrupt files yield `None`.
    #[must_use]
    pub fn load(&self) -> Option<StoredToken> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("ignoring corrupt token store {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Persists the token. Failure is logged, not raised.
    pub fn save(&self, token: &StoredToken) {
        match serde_json::to_string_pretty(token) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("could not save token to {}: {e}", self.path.display());
                }
            }
            Err(e) => warn!("could not serialize token: {e}"),
        }
    }

    /// Removes the stored token. Idempotent.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!("could not remove token store {}: {e}", self.path.display());
        }
    }
}
