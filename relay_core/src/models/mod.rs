//! Data models for the contact relay

pub mod request;

pub use request::{ContactSubmission, RelayResponse};
