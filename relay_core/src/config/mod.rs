//! Service configuration and SMTP credentials

pub mod settings;

pub use settings::{AppConfig, CorsConfig, LoggingConfig, ServerConfig, SmtpConfig, SmtpCredentials};
