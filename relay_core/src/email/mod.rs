//! Outbound email construction and delivery.
//!
//! [`templates`] turns a [`ContactSubmission`](crate::models::ContactSubmission) into the two
//! messages the relay sends; [`mailer`] hands them to an SMTP server through `lettre`.

pub mod mailer;
pub mod templates;

pub use mailer::{Mailer, SmtpMailer};
pub use templates::{confirmation_email, notification_email};

/// A fully rendered message, independent of the transport that will carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}
