//! Route table

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};

use super::{
    contact::{handle_method_not_allowed, handle_preflight, handle_send_email},
    health::handle_health,
};
use crate::AppState;

pub const SEND_EMAIL_PATH: &str = "/api/send-email";
pub const CONTACT_PATH: &str = "/api/contact";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        .route(SEND_EMAIL_PATH, contact_endpoint())
        .route(CONTACT_PATH, contact_endpoint())
}

fn contact_endpoint() -> MethodRouter<AppState> {
    post(handle_send_email)
        .options(handle_preflight)
        .fallback(handle_method_not_allowed)
}
