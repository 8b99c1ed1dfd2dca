//! Outbound email delivery.
//!
//! [`MailTransport`] is the seam between the contact relay and the network:
//! production uses [`SmtpMailer`] (STARTTLS submission through lettre), tests
//! plug in an in-memory transport.

use crate::config::Config;
use futures::future::BoxFuture;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::response::Response;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A fully composed email, independent of the transport that delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid {field} address '{address}': {source}")]
    Address {
        field: &'static str,
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mail delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("Mail delivery rejected: {0}")]
    Rejected(String),
}

/// Something that can deliver an [`OutgoingEmail`].
pub trait MailTransport: Send + Sync {
    /// Deliver one email. Implementations make a single attempt.
    fn send<'a>(&'a self, email: &'a OutgoingEmail) -> BoxFuture<'a, Result<(), MailError>>;
}

/// SMTP submission via STARTTLS with username/password authentication.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let tls = TlsParameters::builder(config.smtp_host.clone())
            .dangerous_accept_invalid_certs(!config.smtp_tls_verify)
            .build()?;

        if !config.smtp_tls_verify {
            warn!("SMTP TLS certificate verification is disabled");
        }

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .tls(Tls::Required(tls))
            .credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_password.clone(),
            ))
            .timeout(Some(config.smtp_timeout()))
            .build();

        info!(
            "SMTP relay configured: {}:{} (STARTTLS)",
            config.smtp_host, config.smtp_port
        );

        Ok(Self { transport })
    }

    /// Convert an [`OutgoingEmail`] into a multipart (plain text + HTML) message.
    pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
        let message = Message::builder()
            .from(parse_mailbox("from", &email.from)?)
            .to(parse_mailbox("to", &email.to)?)
            .reply_to(parse_mailbox("reply-to", &email.reply_to)?)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))?;

        Ok(message)
    }
}

impl MailTransport for SmtpMailer {
    fn send<'a>(&'a self, email: &'a OutgoingEmail) -> BoxFuture<'a, Result<(), MailError>> {
        Box::pin(async move {
            let message = Self::build_message(email)?;
            let response = self.transport.send(message).await?;
            check_response(&response)?;
            debug!("SMTP relay accepted message: {}", response.code());
            Ok(())
        })
    }
}

/// Turn a non-positive relay reply into [`MailError::Rejected`].
fn check_response(response: &Response) -> Result<(), MailError> {
    if response.is_positive() {
        return Ok(());
    }
    let text: Vec<&str> = response.message().collect();
    Err(MailError::Rejected(format!("{} {}", response.code(), text.join(" "))))
}

fn parse_mailbox(field: &'static str, address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        field,
        address: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::transport::smtp::response::{Category, Code, Detail, Severity};

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            from: "site@example.com".to_string(),
            to: "inbox@example.com".to_string(),
            reply_to: "visitor@example.org".to_string(),
            subject: "New Contact Form Submission from Ana".to_string(),
            html_body: "<p>Hello</p>".to_string(),
            text_body: "Hello".to_string(),
        }
    }

    fn test_config() -> Config {
        Config {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            smtp_user: "relay".to_string(),
            smtp_password: "secret".to_string(),
            smtp_tls_verify: false,
            smtp_timeout_secs: 1,
            email_from: "site@example.com".to_string(),
            email_to: "inbox@example.com".to_string(),
            site_url: "https://signalforge.ro".to_string(),
            locales_dir: None,
            port: 8080,
        }
    }

    // ==================== Message Building Tests ====================

    #[test]
    fn test_build_message_headers() {
        let message = SmtpMailer::build_message(&email()).expect("message should build");
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("From: site@example.com"));
        assert!(formatted.contains("To: inbox@example.com"));
        assert!(formatted.contains("Reply-To: visitor@example.org"));
        assert!(formatted.contains("Subject: New Contact Form Submission from Ana"));
        assert!(formatted.contains("multipart/alternative"));
    }

    #[test]
    fn test_build_message_invalid_reply_to() {
        let mut email = email();
        email.reply_to = "not an address".to_string();

        let err = SmtpMailer::build_message(&email).unwrap_err();
        assert!(matches!(err, MailError::Address { field: "reply-to", .. }));
    }

    #[test]
    fn test_build_message_invalid_from() {
        let mut email = email();
        email.from = String::new();

        let err = SmtpMailer::build_message(&email).unwrap_err();
        assert!(matches!(err, MailError::Address { field: "from", .. }));
    }

    // ==================== Response Tests ====================

    fn reply(severity: Severity, text: &str) -> Response {
        Response::new(
            Code::new(severity, Category::MailSystem, Detail::Zero),
            vec![text.to_string()],
        )
    }

    #[test]
    fn test_check_response_accepts_positive_reply() {
        let response = reply(Severity::PositiveCompletion, "Ok: queued");
        assert!(check_response(&response).is_ok());
    }

    #[test]
    fn test_check_response_rejects_negative_reply() {
        let response = reply(Severity::PermanentNegativeCompletion, "mailbox unavailable");

        match check_response(&response) {
            Err(MailError::Rejected(reason)) => assert_eq!(reason, "550 mailbox unavailable"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    // ==================== Transport Tests ====================

    #[tokio::test]
    async fn test_from_config_builds_transport() {
        assert!(SmtpMailer::from_config(&test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_send_to_unreachable_relay_fails() {
        let mut config = test_config();
        // Port 9 (discard) is not an SMTP server
        config.smtp_port = 9;
        let mailer = SmtpMailer::from_config(&config).unwrap();

        let result = mailer.send(&email()).await;
        assert!(matches!(result, Err(MailError::Smtp(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MailError::Timeout(Duration::from_secs(30)).to_string(),
            "Mail delivery timed out after 30s"
        );
        assert_eq!(
            MailError::Rejected("550".to_string()).to_string(),
            "Mail delivery rejected: 550"
        );
    }
}
