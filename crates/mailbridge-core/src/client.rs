//! The mail client contract.

use crate::error::Result;
use crate::model::{EmailDetail, SummaryPage};

/// Capabilities every mail client implementation provides.
///
/// A client moves between two states: unauthenticated and authenticated.
/// Data-fetching operations require the authenticated state and fail with
/// [`Error::Authentication`](crate::Error::Authentication) before any
/// network attempt otherwise.
#[allow(async_fn_in_trait)]
pub trait MailClient {
    /// Authenticates with the mail service.
    ///
    /// Re-entrant: calling this while already authenticated refreshes the
    /// session rather than failing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) when
    /// required credential material is missing locally, and
    /// [`Error::Authentication`](crate::Error::Authentication) for any other
    /// failure during the login/refresh flow.
    async fn authenticate(&mut self) -> Result<()>;

    /// Lists a page of message summaries from the inbox.
    ///
    /// Summaries follow the order of the provider's listing. A message that
    /// disappears between listing and per-message resolution is skipped, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`](crate::Error::Authentication) when
    /// not authenticated, [`Error::Connection`](crate::Error::Connection) on
    /// transient failures, and [`Error::Service`](crate::Error::Service) when
    /// the service fails or responds with an unexpected shape.
    async fn list_summaries(
        &mut self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SummaryPage>;

    /// Fetches the full detail for one message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmailNotFound`](crate::Error::EmailNotFound) when the
    /// message does not exist, plus the same authentication, connection, and
    /// service errors as [`MailClient::list_summaries`].
    async fn get_detail(&mut self, id: &str) -> Result<EmailDetail>;

    /// Reports whether the client currently holds a valid session.
    fn is_authenticated(&self) -> bool;

    /// Logs out, discarding any local session state. Idempotent.
    fn logout(&mut self);
}
