//! # mailbridge-gmail
//!
//! Gmail REST implementation of the `mailbridge` mail client interface.
//!
//! ## Features
//!
//! - **Message transformation**: Gmail's nested multipart payloads flatten
//!   into the interface's summary and detail records — recursive body
//!   extraction, attachment discovery, tolerant address-header parsing
//! - **Authentication**: `OAuth2` with a file-backed token store and
//!   automatic refresh
//! - **Error taxonomy**: transport failures translate into the interface's
//!   error classes at one boundary
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailbridge_core::MailClient;
//! use mailbridge_gmail::{GmailAuthenticator, GmailClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = GmailAuthenticator::new();
//!     let mut client = GmailClient::new(auth);
//!     client.authenticate().await?;
//!
//!     let page = client.list_summaries(10, None).await?;
//!     for summary in &page.summaries {
//!         println!("{}: {}", summary.sender, summary.subject);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## One-time authorization
//!
//! The first token is acquired manually:
//!
//! ```ignore
//! let mut auth = GmailAuthenticator::new();
//! println!("Visit: {}", auth.authorization_url("http://localhost:8080")?);
//! // After approving, paste the code from the redirect:
//! auth.exchange_code(code, "http://localhost:8080").await?;
//! ```
//!
//! The refreshed token persists in `token.json`; subsequent runs
//! authenticate unattended.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod auth;
mod client;
pub mod transform;
pub mod transport;
pub mod wire;

pub use auth::{Authenticator, GmailAuthenticator};
pub use client::GmailClient;
pub use transport::{MessageApi, RestTransport};
