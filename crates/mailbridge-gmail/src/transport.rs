//! HTTP transport for the Gmail REST API.
//!
//! Thin request/response plumbing: build the URL, attach the bearer token,
//! deserialize the JSON. Errors stay transport-shaped here; translating
//! them into the domain taxonomy is the client's job, and only the
//! client's.

use serde::de::DeserializeOwned;

use crate::wire;

/// Base endpoint of the Gmail REST API.
const DEFAULT_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Headers requested for metadata-format fetches: everything a summary
/// needs and nothing more.
const METADATA_HEADERS: [&str; 4] = ["From", "Subject", "Date", "To"];

/// Label restricting listings to the inbox.
const INBOX_LABEL: &str = "INBOX";

/// Transport-level errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with a non-success status.
    #[error("HTTP status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        message: String,
    },

    /// The request failed before a response arrived, or while decoding one.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message-level operations of the provider REST API.
///
/// The client orchestrates against this trait; tests substitute a scripted
/// implementation for it.
#[allow(async_fn_in_trait)]
pub trait MessageApi {
    /// Lists message references from the inbox, newest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request or decoding fails.
    async fn list_messages(
        &self,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<wire::MessageList>;

    /// Fetches one message in metadata format (headers only, no part tree).
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request or decoding fails.
    async fn get_message_metadata(&self, id: &str) -> Result<wire::Message>;

    /// Fetches one message in full format (complete part tree).
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request or decoding fails.
    async fn get_message_full(&self, id: &str) -> Result<wire::Message>;
}

/// [`MessageApi`] over HTTPS against the Gmail REST endpoint.
#[derive(Debug, Clone)]
pub struct RestTransport {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl RestTransport {
    /// Creates a transport against the production Gmail endpoint.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    /// Creates a transport against a custom endpoint, e.g. a local stub.
    #[must_use]
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(format!("{}/{path}", self.base_url))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

impl MessageApi for RestTransport {
    async fn list_messages(
        &self,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<wire::MessageList> {
        let mut query = vec![
            ("maxResults", max_results.to_string()),
            ("labelIds", INBOX_LABEL.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }
        self.get_json("messages", &query).await
    }

    async fn get_message_metadata(&self, id: &str) -> Result<wire::Message> {
        let mut query = vec![("format", "metadata".to_string())];
        for header in METADATA_HEADERS {
            query.push(("metadataHeaders", header.to_string()));
        }
        self.get_json(&format!("messages/{id}"), &query).await
    }

    async fn get_message_full(&self, id: &str) -> Result<wire::Message> {
        self.get_json(&format!("messages/{id}"), &[("format", "full".to_string())])
            .await
    }
}
