//! Gmail `OAuth2` authentication.
//!
//! The [`Authenticator`] trait is the boundary the client depends on: give
//! me a working channel, am I currently valid, invalidate me. The concrete
//! [`GmailAuthenticator`] behind it reads client secrets from a
//! Google-format `credentials.json`, keeps the token in a file store, and
//! refreshes it against the provider token endpoint when it expires.
//!
//! The first token is acquired out of band:
//! [`GmailAuthenticator::authorization_url`] produces the consent URL and
//! [`GmailAuthenticator::exchange_code`] trades the resulting code for a
//! token. After that one-time step, [`Authenticator::authenticate`] runs
//! unattended on the stored refresh token.

mod secrets;
mod token;

pub use secrets::ClientSecrets;
pub use token::{FileTokenStore, StoredToken, TokenResponse};

use mailbridge_core::{Error, Result};
use std::path::PathBuf;
use tracing::debug;
use url::Url;

use crate::transport::RestTransport;

/// Read-only Gmail scope; this client never mutates the mailbox.
const SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Default path of the client secrets file.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Default path of the token store.
const TOKEN_FILE: &str = "token.json";

/// Supplies a valid, ready-to-use transport channel.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    /// The transport handle this authenticator produces.
    type Channel;

    /// Returns a working channel, refreshing credentials as needed.
    /// Re-entrant: calling while already valid hands out a fresh channel
    /// rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when required credential material is
    /// missing locally, and [`Error::Authentication`] for any other failure
    /// during the login/refresh flow.
    async fn authenticate(&mut self) -> Result<Self::Channel>;

    /// Whether a currently valid credential is held.
    fn is_valid(&self) -> bool;

    /// Discards credential state. Idempotent.
    fn invalidate(&mut self);
}

/// [`Authenticator`] for the Gmail REST API.
#[derive(Debug)]
pub struct GmailAuthenticator {
    credentials_path: PathBuf,
    store: FileTokenStore,
    http: reqwest::Client,
    current: Option<StoredToken>,
}

impl GmailAuthenticator {
    /// Creates an authenticator with the default file locations
    /// (`credentials.json` and `token.json` in the working directory).
    #[must_use]
    pub fn new() -> Self {
        Self::with_paths(CREDENTIALS_FILE, TOKEN_FILE)
    }

    /// Creates an authenticator with explicit file locations.
    #[must_use]
    pub fn with_paths(credentials_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            store: FileTokenStore::new(token_path.into()),
            http: reqwest::Client::new(),
            current: None,
        }
    }

    /// Builds the consent URL for the one-time manual authorization step.
    ///
    /// Open it in a browser, approve read-only access, then pass the code
    /// from the redirect to [`GmailAuthenticator::exchange_code`]. Offline
    /// access is requested so the server issues a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the credentials file is missing
    /// or carries a malformed authorization URI.
    pub fn authorization_url(&self, redirect_uri: &str) -> Result<Url> {
        let secrets = ClientSecrets::load(&self.credentials_path)?;
        let mut url = Url::parse(&secrets.auth_uri)
            .map_err(|e| Error::Configuration(format!("malformed auth URI: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &secrets.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent");
        Ok(url)
    }

    /// Exchanges an authorization code for a token and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the credentials file is
    /// missing, and [`Error::Authentication`] when the exchange is rejected.
    pub async fn exchange_code(&mut self, code: &str, redirect_uri: &str) -> Result<()> {
        let secrets = ClientSecrets::load(&self.credentials_path)?;
        let token = self
            .request_token(
                &secrets,
                &[
                    ("client_id", secrets.client_id.as_str()),
                    ("client_secret", secrets.client_secret.as_str()),
                    ("code", code),
                    ("grant_type", "authorization_code"),
                    ("redirect_uri", redirect_uri),
                ],
                None,
            )
            .await?;
        self.store.save(&token);
        self.current = Some(token);
        Ok(())
    }

    /// Produces a usable token: the cached one, the stored one, or a
    /// refresh-grant round-trip.
    async fn obtain_token(&mut self, secrets: &ClientSecrets) -> Result<StoredToken> {
        let candidate = self.current.take().or_else(|| self.store.load());

        if let Some(token) = candidate {
            if token.is_valid() {
                debug!("using stored access token");
                self.current = Some(token.clone());
                return Ok(token);
            }
            if let Some(refresh) = token.refresh_token.clone() {
                debug!("access token expired, refreshing");
                let refreshed = self
                    .request_token(
                        secrets,
                        &[
                            ("client_id", secrets.client_id.as_str()),
                            ("client_secret", secrets.client_secret.as_str()),
                            ("refresh_token", refresh.as_str()),
                            ("grant_type", "refresh_token"),
                        ],
                        Some(refresh.clone()),
                    )
                    .await?;
                self.store.save(&refreshed);
                self.current = Some(refreshed.clone());
                return Ok(refreshed);
            }
        }

        Err(Error::Authentication(
            "no usable stored token; complete the authorization flow first".to_string(),
        ))
    }

    async fn request_token(
        &self,
        secrets: &ClientSecrets,
        params: &[(&str, &str)],
        previous_refresh: Option<String>,
    ) -> Result<StoredToken> {
        let response = self
            .http
            .post(&secrets.token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Authentication(format!(
                "token request rejected ({status}): {body}"
            )));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Authentication(format!("malformed token response: {e}")))?;
        Ok(StoredToken::from_response(parsed, previous_refresh))
    }
}

impl Default for GmailAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for GmailAuthenticator {
    type Channel = RestTransport;

    async fn authenticate(&mut self) -> Result<RestTransport> {
        // Credential material is checked before any token logic so a missing
        // setup surfaces as Configuration even when a token is cached.
        let secrets = ClientSecrets::load(&self.credentials_path)?;
        let token = self.obtain_token(&secrets).await?;
        Ok(RestTransport::new(token.access_token))
    }

    fn is_valid(&self) -> bool {
        self.current.as_ref().is_some_and(StoredToken::is_valid)
    }

    fn invalidate(&mut self) {
        self.current = None;
        self.store.clear();
    }
}
