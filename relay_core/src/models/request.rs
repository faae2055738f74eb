//! Request and response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{RelayError, Result};

pub const NOT_PROVIDED: &str = "Not provided";
pub const NOT_SPECIFIED: &str = "Not specified";

/// One contact-form submission, as posted by the website.
///
/// Required fields are `Option` so that an absent field and an empty one are rejected the
/// same way by [`ContactSubmission::check_required`] rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,

    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

impl ContactSubmission {
    pub fn check_required(&self) -> Result<()> {
        self.validate().map_err(|errors| {
            tracing::debug!(fields = ?errors.field_errors().keys().collect::<Vec<_>>(), "Submission failed validation");
            RelayError::MissingFields
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn company_or_default(&self) -> &str {
        non_empty(&self.company).unwrap_or(NOT_PROVIDED)
    }

    pub fn phone_or_default(&self) -> &str {
        non_empty(&self.phone).unwrap_or(NOT_PROVIDED)
    }

    pub fn service_or_default(&self) -> &str {
        non_empty(&self.service).unwrap_or(NOT_SPECIFIED)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Body of every response from the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
}

impl RelayResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
