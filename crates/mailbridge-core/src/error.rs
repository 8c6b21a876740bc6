//! Error taxonomy shared by every mail client implementation.

use thiserror::Error;

/// Errors a mail client operation can surface to callers.
///
/// Implementations translate their transport-specific failures into these
/// variants; transport error shapes never leak past a client.
#[derive(Debug, Error)]
pub enum Error {
    /// Required local setup (credential material) is missing. Not retryable;
    /// the user has to fix their environment.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credentials are expired, invalid, or the login/refresh flow failed.
    /// Recoverable by re-authenticating.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Transient network or client-side failure. Retryable.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The remote service failed (5xx) or returned an unexpected shape.
    /// Retryable with backoff.
    #[error("Service error: {0}")]
    Service(String),

    /// The requested message does not exist. Terminal for that id only.
    #[error("Email not found: {0}")]
    EmailNotFound(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
