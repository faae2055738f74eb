use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    email::{confirmation_email, notification_email, Mailer},
    error::{RelayError, Result, SendStage},
    models::ContactSubmission,
};

/// Turns one validated submission into a notification for the business inbox and a
/// confirmation for the submitter.
///
/// `mailer` is `None` when SMTP credentials were not supplied at start-up. The relay still
/// serves requests in that state and answers valid submissions with a configuration error.
#[derive(Clone)]
pub struct ContactRelay {
    mailer: Option<Arc<dyn Mailer>>,
    log_bodies: bool,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            mailer: Some(mailer),
            log_bodies: false,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            mailer: None,
            log_bodies: false,
        }
    }

    pub fn from_option(mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self {
            mailer,
            log_bodies: false,
        }
    }

    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.mailer.is_some()
    }

    #[tracing::instrument(name = "contact_submission", skip_all, fields(submission_id = %Uuid::new_v4()))]
    pub async fn submit(&self, submission: ContactSubmission) -> Result<()> {
        submission.check_required()?;

        let Some(mailer) = &self.mailer else {
            return Err(RelayError::ConfigurationMissing);
        };

        info!(
            service = %submission.service_or_default(),
            "Relaying contact form submission"
        );
        if self.log_bodies {
            debug!(
                name = %submission.name(),
                email = %submission.email(),
                message = %submission.message(),
                "Submission content"
            );
        }

        let notification = notification_email(&submission);
        let confirmation = confirmation_email(&submission);

        mailer.send(&notification).await.map_err(|source| {
            error!(error = %source, "Notification email failed, nothing was delivered");
            RelayError::Delivery {
                stage: SendStage::Notification,
                source,
            }
        })?;

        mailer.send(&confirmation).await.map_err(|source| {
            warn!(
                error = %source,
                "Confirmation email failed after the notification was delivered"
            );
            RelayError::Delivery {
                stage: SendStage::Confirmation,
                source,
            }
        })?;

        info!("Both emails sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        email::{templates::BUSINESS_INBOX, OutboundEmail},
        error::MailError,
    };
    use crate::test_logs;
    use async_trait::async_trait;
    use axum::{http::StatusCode, response::IntoResponse};
    use parking_lot::Mutex;

    /// Records every message and fails the send whose zero-based index is `fail_at`.
    #[derive(Default)]
    struct ScriptedMailer {
        sent: Mutex<Vec<OutboundEmail>>,
        attempts: Mutex<usize>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl Mailer for ScriptedMailer {
        async fn send(&self, email: &OutboundEmail) -> std::result::Result<(), MailError> {
            let attempt = {
                let mut attempts = self.attempts.lock();
                *attempts += 1;
                *attempts - 1
            };
            if self.fail_at == Some(attempt) {
                return Err(MailError::Smtp("421 service not available".to_string()));
            }
            self.sent.lock().push(email.clone());
            Ok(())
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
            message: Some("Hello".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submit_sends_notification_then_confirmation() {
        let mailer = Arc::new(ScriptedMailer::default());
        let relay = ContactRelay::new(mailer.clone());

        relay.submit(submission()).await.unwrap();

        let sent = mailer.sent.lock();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, BUSINESS_INBOX);
        assert_eq!(sent[0].reply_to.as_deref(), Some("test@example.com"));
        assert_eq!(sent[1].to, "test@example.com");
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_send() {
        let mailer = Arc::new(ScriptedMailer::default());
        let relay = ContactRelay::new(mailer.clone());

        let invalid = ContactSubmission {
            message: None,
            ..submission()
        };
        let result = relay.submit(invalid).await;

        assert!(matches!(result, Err(RelayError::MissingFields)));
        assert_eq!(*mailer.attempts.lock(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_relay() {
        let relay = ContactRelay::unconfigured();
        assert!(!relay.is_configured());

        let result = relay.submit(submission()).await;
        assert!(matches!(result, Err(RelayError::ConfigurationMissing)));
    }

    #[tokio::test]
    async fn test_unconfigured_relay_still_validates_first() {
        let result = ContactRelay::unconfigured()
            .submit(ContactSubmission::default())
            .await;
        assert!(matches!(result, Err(RelayError::MissingFields)));
    }

    #[tokio::test]
    async fn test_notification_failure_stops_confirmation() {
        let mailer = Arc::new(ScriptedMailer {
            fail_at: Some(0),
            ..Default::default()
        });
        let relay = ContactRelay::new(mailer.clone());

        let result = relay.submit(submission()).await;

        assert!(matches!(
            result,
            Err(RelayError::Delivery { stage: SendStage::Notification, .. })
        ));
        assert_eq!(*mailer.attempts.lock(), 1);
        assert!(mailer.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_failure_reported_as_failure() {
        let mailer = Arc::new(ScriptedMailer {
            fail_at: Some(1),
            ..Default::default()
        });
        let relay = ContactRelay::new(mailer.clone()).with_body_logging(true);

        let result = relay.submit(submission()).await;

        assert!(matches!(
            result,
            Err(RelayError::Delivery { stage: SendStage::Confirmation, .. })
        ));
        assert_eq!(mailer.sent.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_default_logging_omits_submitter_details() {
        let (_guard, logs) = test_logs::capture();
        let relay = ContactRelay::new(Arc::new(ScriptedMailer::default()));

        relay.submit(submission()).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("Relaying contact form submission"));
        assert!(!output.contains("test@example.com"));
        assert!(!output.contains("Test User"));
    }

    #[tokio::test]
    async fn test_body_logging_includes_submitter_details() {
        let (_guard, logs) = test_logs::capture();
        let relay = ContactRelay::new(Arc::new(ScriptedMailer::default())).with_body_logging(true);

        relay.submit(submission()).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("test@example.com"));
        assert!(output.contains("Test User"));
    }

    #[tokio::test]
    async fn test_delivery_failure_logged_once_at_error() {
        let (_guard, logs) = test_logs::capture();
        let relay = ContactRelay::new(Arc::new(ScriptedMailer {
            fail_at: Some(0),
            ..Default::default()
        }));

        let response = relay.submit(submission()).await.unwrap_err().into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(logs.lines_at("ERROR"), 1);
    }
}
