//! Gmail implementation of the mail client contract.

use mailbridge_core::{EmailDetail, Error, MailClient, Result, SummaryPage};
use tracing::debug;

use crate::auth::Authenticator;
use crate::transform;
use crate::transport::{self, MessageApi};

/// Mail client backed by the Gmail REST API.
///
/// Generic over its [`Authenticator`] so tests can script the channel;
/// production code uses [`GmailAuthenticator`](crate::GmailAuthenticator).
/// One request is in flight at a time per instance; the `&mut self`
/// receivers make shared mutation a compile-time error, so single-owner
/// usage needs no locking.
pub struct GmailClient<A: Authenticator> {
    authenticator: A,
    channel: Option<A::Channel>,
}

impl<A: Authenticator> GmailClient<A> {
    /// Creates an unauthenticated client.
    #[must_use]
    pub const fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            channel: None,
        }
    }

    /// The current channel, or the authentication-required error. No
    /// network attempt happens before this check passes.
    fn channel(&self) -> Result<&A::Channel> {
        match &self.channel {
            Some(channel) if self.authenticator.is_valid() => Ok(channel),
            _ => Err(Error::Authentication(
                "not authenticated; call authenticate() first".to_string(),
            )),
        }
    }
}

impl<A: Authenticator> MailClient for GmailClient<A>
where
    A::Channel: MessageApi,
{
    async fn authenticate(&mut self) -> Result<()> {
        self.channel = Some(self.authenticator.authenticate().await?);
        Ok(())
    }

    async fn list_summaries(
        &mut self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SummaryPage> {
        let channel = self.channel()?;
        let listing = channel
            .list_messages(page_size, page_token)
            .await
            .map_err(map_transport_error)?;

        let mut summaries = Vec::with_capacity(listing.messages.len());
        for reference in &listing.messages {
            // Ids are resolved one at a time, so summaries come back in
            // listing order.
            match channel.get_message_metadata(&reference.id).await {
                Ok(message) => summaries.push(transform::to_summary(&message)?),
                Err(transport::Error::Status { status: 404, .. }) => {
                    // Deleted between listing and resolution. Expected, not
                    // an error for the batch.
                    debug!("message {} vanished during listing, skipped", reference.id);
                }
                Err(e) => return Err(map_transport_error(e)),
            }
        }

        Ok(SummaryPage {
            summaries,
            next_page_token: listing.next_page_token,
        })
    }

    async fn get_detail(&mut self, id: &str) -> Result<EmailDetail> {
        let channel = self.channel()?;
        let message = channel.get_message_full(id).await.map_err(|e| match e {
            transport::Error::Status { status: 404, .. } => Error::EmailNotFound(id.to_string()),
            other => map_transport_error(other),
        })?;
        transform::to_detail(&message)
    }

    fn is_authenticated(&self) -> bool {
        self.channel.is_some() && self.authenticator.is_valid()
    }

    fn logout(&mut self) {
        self.channel = None;
        self.authenticator.invalidate();
    }
}

/// Sole translation point from transport errors to the domain taxonomy.
fn map_transport_error(error: transport::Error) -> Error {
    match error {
        transport::Error::Status { status: 401, .. } => {
            Error::Authentication("authentication expired".to_string())
        }
        transport::Error::Status { status: 404, message } => Error::EmailNotFound(message),
        transport::Error::Status { status, message } if status >= 500 => {
            Error::Service(format!("service returned {status}: {message}"))
        }
        transport::Error::Status { status, message } => {
            Error::Connection(format!("request failed with {status}: {message}"))
        }
        transport::Error::Http(e) if e.is_decode() => {
            Error::Service(format!("malformed service response: {e}"))
        }
        transport::Error::Http(e) => Error::Connection(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unauthorized = transport::Error::Status {
            status: 401,
            message: String::new(),
        };
        assert!(matches!(
            map_transport_error(unauthorized),
            Error::Authentication(_)
        ));

        let server = transport::Error::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(matches!(map_transport_error(server), Error::Service(_)));

        let client_side = transport::Error::Status {
            status: 429,
            message: String::new(),
        };
        assert!(matches!(
            map_transport_error(client_side),
            Error::Connection(_)
        ));
    }
}
