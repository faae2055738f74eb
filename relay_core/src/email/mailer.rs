//! SMTP delivery through `lettre`

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{debug, info};

use super::OutboundEmail;
use crate::config::{SmtpConfig, SmtpCredentials};
use crate::error::MailError;

/// Anything that can deliver an [`OutboundEmail`].
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Submission over STARTTLS with username/app-password authentication.
///
/// A fresh connection is opened per message; there is no pooling and no retry.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, credentials: &SmtpCredentials) -> Result<Self, MailError> {
        let address: Address = credentials
            .username
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("{}: {}", credentials.username, e)))?;
        let from = Mailbox::new(Some(config.from_name.clone()), address);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ))
            .build();

        info!(
            smtp_host = %config.host,
            smtp_port = config.port,
            from = %from,
            "SMTP mailer initialized with STARTTLS"
        );

        Ok(Self { transport, from })
    }

    pub fn build_message(&self, email: &OutboundEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.clone());

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        builder
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        debug!(
            to = %email.to,
            code = %response.code(),
            "SMTP server accepted message"
        );

        Ok(())
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox, MailError> {
    value
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("{}: {}", value, e)))
}
