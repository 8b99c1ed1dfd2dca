use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // SMTP relay
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub smtp_tls_verify: bool,
    pub smtp_timeout_secs: u64,

    // Contact form routing
    pub email_from: String,
    pub email_to: String,

    // Site
    pub site_url: String,
    pub locales_dir: Option<String>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // SMTP relay (STARTTLS)
            smtp_host: std::env::var("SMTP_HOST").context("SMTP_HOST not set")?,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_user: std::env::var("SMTP_USER").context("SMTP_USER not set")?,
            smtp_password: std::env::var("SMTP_PASSWORD").context("SMTP_PASSWORD not set")?,
            smtp_tls_verify: std::env::var("SMTP_TLS_VERIFY")
                .ok()
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
            smtp_timeout_secs: std::env::var("SMTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            // Contact form routing
            email_from: std::env::var("EMAIL_FROM").context("EMAIL_FROM not set")?,
            email_to: std::env::var("EMAIL_TO").context("EMAIL_TO not set")?,

            // Site
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://signalforge.ro".to_string()),
            locales_dir: std::env::var("LOCALES_DIR").ok().filter(|v| !v.is_empty()),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    /// Upper bound on waiting for the SMTP relay to accept a message.
    pub fn smtp_timeout(&self) -> Duration {
        Duration::from_secs(self.smtp_timeout_secs)
    }
}
