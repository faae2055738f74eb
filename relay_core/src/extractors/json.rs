//! JSON extractor that reports malformed bodies in the relay's own response shape

use axum::{
    async_trait,
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::RelayError;

/// Like [`axum::Json`], but any rejection (wrong content type, syntax error, wrong field
/// types, non-object body) becomes [`RelayError::InvalidBody`] so the caller still receives
/// `{ success: false, message }`.
pub struct SubmissionJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for SubmissionJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RelayError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(SubmissionJson(value)),
            Err(rejection) => Err(RelayError::InvalidBody(describe(&rejection))),
        }
    }
}

fn describe(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "missing application/json content type".to_string(),
        JsonRejection::JsonSyntaxError(_) => format!("malformed JSON: {}", rejection.body_text()),
        JsonRejection::JsonDataError(_) => format!("unexpected JSON shape: {}", rejection.body_text()),
        other => other.body_text(),
    }
}
