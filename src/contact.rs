//! Contact-form relay: validates a submission and forwards it as an email.

use crate::html::escape_html;
use crate::mailer::{MailError, MailTransport, OutgoingEmail};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Raw contact-form payload as posted by the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

/// Problems with the submission itself. The messages are shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,
}

/// Everything that can stop a submission from being relayed.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Invalid(#[from] ContactError),

    #[error("Malformed contact payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Delivery(#[from] MailError),
}

/// Where relayed submissions go and how long delivery may take.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub from: String,
    pub to: String,
    pub timeout: Duration,
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Permissive syntactic email check: `something@something.something`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    regex.is_match(email)
}

fn required(field: Option<String>) -> Result<String, ContactError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(ContactError::MissingFields)
}

impl ContactSubmission {
    pub fn validate(self) -> Result<ContactRequest, ContactError> {
        let request = ContactRequest {
            name: required(self.name)?,
            phone_number: required(self.phone_number)?,
            email: required(self.email)?,
            company: self.company.filter(|company| !company.is_empty()),
            message: required(self.message)?,
        };

        if !is_valid_email(&request.email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(request)
    }
}

impl ContactRequest {
    /// Compose the notification email sent to the site owner.
    pub fn compose(&self, from: &str, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: from.to_string(),
            to: to.to_string(),
            reply_to: self.email.clone(),
            subject: format!("New Contact Form Submission from {}", self.name),
            html_body: self.html_body(),
            text_body: self.text_body(),
        }
    }

    fn html_body(&self) -> String {
        let company = self
            .company
            .as_deref()
            .map(|company| format!("<p><strong>Company:</strong> {}</p>\n", escape_html(company)))
            .unwrap_or_default();

        format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Phone:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             {}\
             <p><strong>Message:</strong></p>\n\
             <p>{}</p>\n",
            escape_html(&self.name),
            escape_html(&self.phone_number),
            escape_html(&self.email),
            company,
            escape_html(&self.message).replace('\n', "<br>"),
        )
    }

    fn text_body(&self) -> String {
        let company = self
            .company
            .as_deref()
            .map(|company| format!("Company: {}\n", company))
            .unwrap_or_default();

        format!(
            "New Contact Form Submission\n\n\
             Name: {}\n\
             Phone: {}\n\
             Email: {}\n\
             {}\n\
             Message:\n\
             {}\n",
            self.name, self.phone_number, self.email, company, self.message
        )
    }
}

/// Parse, validate, compose and deliver one contact submission.
///
/// Delivery is a single attempt bounded by `settings.timeout`.
pub async fn relay(
    body: &[u8],
    settings: &RelaySettings,
    transport: &dyn MailTransport,
) -> Result<(), RelayError> {
    let submission: ContactSubmission = serde_json::from_slice(body)?;
    let request = submission.validate()?;
    let email = request.compose(&settings.from, &settings.to);

    match tokio::time::timeout(settings.timeout, transport.send(&email)).await {
        Ok(result) => result?,
        Err(_) => return Err(MailError::Timeout(settings.timeout).into()),
    }

    info!("Contact form submission from {} relayed", request.email);
    Ok(())
}
