//! Contact form endpoint

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Json,
};
use tracing::{debug, info};

use crate::{
    email::templates::SUCCESS_MESSAGE,
    error::{RelayError, Result},
    extractors::SubmissionJson,
    models::{ContactSubmission, RelayResponse},
    AppState,
};

pub async fn handle_send_email(
    State(state): State<AppState>,
    SubmissionJson(submission): SubmissionJson<ContactSubmission>,
) -> Result<Json<RelayResponse>> {
    info!("POST contact form submission received");

    state.relay.submit(submission).await?;

    Ok(Json(RelayResponse::success(SUCCESS_MESSAGE)))
}

/// Preflight for browsers that reach the handler directly; answered with an empty body.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn handle_method_not_allowed(method: Method) -> RelayError {
    debug!(method = %method, "Rejected non-POST request to contact endpoint");
    RelayError::MethodNotAllowed
}
