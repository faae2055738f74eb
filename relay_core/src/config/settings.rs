use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const USERNAME_VAR: &str = "EMAIL_USER";
pub const PASSWORD_VAR: &str = "EMAIL_PASS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub smtp: SmtpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_seconds: u64,
}

/// Cross-origin headers for the static frontend, which is served from another origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub enabled: bool,
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub from_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Include the submitter's name, email and message in debug logs.
    pub log_bodies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            smtp: SmtpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            shutdown_timeout_seconds: 10,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age_seconds: 3600,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            from_name: "BahBeta Website".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_bodies: false }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(Self::env_source())
    }

    /// `APP_` prefix, `__` between nesting levels, so underscored field names survive:
    /// `APP_SERVER__PORT`, `APP_SMTP__FROM_NAME`, `APP_LOGGING__LOG_BODIES`.
    pub fn env_source() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    pub fn load_with_env(env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(env);

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.smtp.host.is_empty() {
            return Err(ConfigError::Message("SMTP host cannot be empty".to_string()));
        }

        if self.smtp.port == 0 {
            return Err(ConfigError::Message("SMTP port cannot be 0".to_string()));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Mailbox identity and app password for SMTP submission.
///
/// These are secrets, so they are read from the process environment only and never from
/// `config.toml`. The username doubles as the visible sender address.
#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl SmtpCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns `None` when either variable is unset or empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(USERNAME_VAR).filter(|v| !v.is_empty())?;
        let password = lookup(PASSWORD_VAR).filter(|v| !v.is_empty())?;
        Some(Self::new(username, password))
    }
}

impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert!(config.cors.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.smtp.host = String::new();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.smtp.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");

        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_config_loading() {
        let config = AppConfig::load().expect("Should load default configuration");

        assert!(config.validate().is_ok());
        assert!(!config.smtp.host.is_empty());
        assert!(config.server.port > 0);
    }

    #[test]
    fn test_env_overrides_underscored_fields() {
        let vars: HashMap<String, String> = [
            ("APP_SERVER__PORT", "4321"),
            ("APP_SERVER__SHUTDOWN_TIMEOUT_SECONDS", "99"),
            ("APP_SMTP__FROM_NAME", "BahBeta Contact Desk"),
            ("APP_CORS__MAX_AGE_SECONDS", "120"),
            ("APP_LOGGING__LOG_BODIES", "true"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = AppConfig::load_with_env(AppConfig::env_source().source(Some(vars)))
            .expect("overrides should deserialize");

        assert_eq!(config.server.port, 4321);
        assert_eq!(config.server.shutdown_timeout_seconds, 99);
        assert_eq!(config.smtp.from_name, "BahBeta Contact Desk");
        assert_eq!(config.cors.max_age_seconds, 120);
        assert!(config.logging.log_bodies);
        assert_eq!(config.smtp.host, "smtp.gmail.com");
    }

    #[test]
    fn test_credentials_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (USERNAME_VAR, "relay@bahbeta.com"),
            (PASSWORD_VAR, "app-password"),
        ]
        .into_iter()
        .collect();

        let credentials = SmtpCredentials::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("both variables are set");
        assert_eq!(credentials.username, "relay@bahbeta.com");
        assert_eq!(credentials.password, "app-password");
    }

    #[test]
    fn test_credentials_missing_or_empty() {
        assert!(SmtpCredentials::from_lookup(|_| None).is_none());

        let only_user = |key: &str| (key == USERNAME_VAR).then(|| "relay@bahbeta.com".to_string());
        assert!(SmtpCredentials::from_lookup(only_user).is_none());

        let empty_password = |key: &str| {
            if key == USERNAME_VAR {
                Some("relay@bahbeta.com".to_string())
            } else {
                Some(String::new())
            }
        };
        assert!(SmtpCredentials::from_lookup(empty_password).is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = SmtpCredentials::new("relay@bahbeta.com", "hunter2");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("relay@bahbeta.com"));
        assert!(!printed.contains("hunter2"));
    }
}
