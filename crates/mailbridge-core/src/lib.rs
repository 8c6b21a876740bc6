//! # mailbridge-core
//!
//! Provider-agnostic interface for reading a remote mailbox.
//!
//! This crate defines the contract; implementation crates (such as
//! `mailbridge-gmail`) supply the provider plumbing behind it:
//! - Domain models ([`EmailSummary`], [`EmailDetail`], [`EmailAddress`],
//!   [`Attachment`])
//! - The error taxonomy every implementation maps onto ([`Error`])
//! - The [`MailClient`] trait (authenticate, list, fetch detail, check auth
//!   state, log out)
//!
//! All models are transient values rebuilt from each provider response;
//! nothing in this crate performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod model;

pub use client::MailClient;
pub use error::{Error, Result};
pub use model::{
    Attachment, EmailAddress, EmailDetail, EmailStatus, EmailSummary, NO_SUBJECT, SummaryPage,
};
