pub mod config;
pub mod contact;
pub mod html;
pub mod i18n;
pub mod mailer;
pub mod pages;
pub mod server;
