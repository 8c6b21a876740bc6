//! Example: read your Gmail inbox from the terminal.
//!
//! Authenticates with a stored token, lists the most recent inbox
//! messages, and prints the full detail of the first one.
//!
//! ## Prerequisites
//!
//! 1. Create an OAuth client (Desktop app) in the Google Cloud Console and
//!    save the downloaded file as `credentials.json` in the working
//!    directory.
//! 2. Authorize once:
//!    - run this example; it prints the consent URL when no token exists
//!    - approve read-only access and paste the code from the redirect
//!
//! ## Running
//!
//! ```bash
//! cargo run --example inbox_cli
//! ```

use std::io::{self, Write as _};

use mailbridge_core::{Error, MailClient};
use mailbridge_gmail::{GmailAuthenticator, GmailClient};

const REDIRECT_URI: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let auth = match bootstrap(GmailAuthenticator::new()).await {
        Ok(auth) => auth,
        Err(e) => {
            eprintln!("Authorization failed: {e}");
            return Ok(());
        }
    };
    let mut client = GmailClient::new(auth);

    println!("Authenticating with Gmail...");
    client.authenticate().await?;
    println!("Authenticated.\n");

    let page = client.list_summaries(10, None).await?;
    if page.summaries.is_empty() {
        println!("No messages in the inbox.");
        return Ok(());
    }

    println!("Recent messages:");
    for (i, summary) in page.summaries.iter().enumerate() {
        let marker = if summary.has_attachments { " [att]" } else { "" };
        println!(
            "{:2}. {}: {}{marker}",
            i + 1,
            summary.sender,
            summary.subject
        );
        println!("    {} | {}", summary.sent_at.format("%Y-%m-%d %H:%M"), summary.preview);
    }

    let first = &page.summaries[0];
    println!("\nDetail of the newest message:");
    let detail = client.get_detail(&first.id).await?;
    println!("From: {}", detail.sender);
    println!(
        "To: {}",
        detail
            .to
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Subject: {}", detail.subject);
    for attachment in &detail.attachments {
        println!(
            "Attachment: {} ({} bytes)",
            attachment.filename, attachment.size_bytes
        );
    }
    println!();
    println!(
        "{}",
        detail
            .body_text
            .or(detail.body_html)
            .unwrap_or_else(|| "(No content)".to_string())
    );

    Ok(())
}

/// Runs the one-time authorization flow when no stored token exists.
async fn bootstrap(mut auth: GmailAuthenticator) -> anyhow::Result<GmailAuthenticator> {
    use mailbridge_gmail::Authenticator as _;

    match auth.authenticate().await {
        Ok(_) => Ok(auth),
        Err(Error::Authentication(_)) => {
            println!("No stored token. Visit this URL and approve access:");
            println!("{}", auth.authorization_url(REDIRECT_URI)?);
            print!("Paste the authorization code: ");
            io::stdout().flush()?;

            let mut code = String::new();
            io::stdin().read_line(&mut code)?;
            auth.exchange_code(code.trim(), REDIRECT_URI).await?;
            Ok(auth)
        }
        Err(e) => Err(e.into()),
    }
}
