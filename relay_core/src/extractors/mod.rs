pub mod json;

pub use json::SubmissionJson;
