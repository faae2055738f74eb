//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::email::templates::{FALLBACK_MESSAGE, MISSING_FIELDS_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE};
use crate::models::RelayResponse;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Which of the two outbound messages was being sent when delivery failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStage {
    Notification,
    Confirmation,
}

impl std::fmt::Display for SendStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendStage::Notification => write!(f, "notification"),
            SendStage::Confirmation => write!(f, "confirmation"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("SMTP credentials are not configured")]
    ConfigurationMissing,

    #[error("Failed to send {stage} email: {source}")]
    Delivery {
        stage: SendStage,
        #[source]
        source: MailError,
    },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MissingFields | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::ConfigurationMissing | RelayError::Delivery { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The text shown to the person who filled in the form.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE,
            RelayError::MissingFields | RelayError::InvalidBody(_) => MISSING_FIELDS_MESSAGE,
            RelayError::ConfigurationMissing | RelayError::Delivery { .. } => FALLBACK_MESSAGE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::MethodNotAllowed => {}
            RelayError::MissingFields => {
                tracing::warn!("Rejected submission with missing required fields");
            }
            RelayError::InvalidBody(reason) => {
                tracing::warn!(reason = %reason, "Rejected unparseable submission body");
            }
            RelayError::ConfigurationMissing => {
                tracing::error!("Email credentials missing from environment");
            }
            RelayError::Delivery { stage, source } => {
                tracing::debug!(stage = %stage, error = %source, "Answering failed delivery with fallback message");
            }
        }

        let status = self.status_code();
        let body = Json(RelayResponse::failure(self.public_message()));

        (status, body).into_response()
    }
}
