//! Contact form relay: accepts website enquiries over HTTP and forwards them by SMTP.

pub mod config;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_logs;

pub use config::{AppConfig, SmtpCredentials};
pub use email::{Mailer, OutboundEmail, SmtpMailer};
pub use error::{MailError, RelayError, Result, SendStage};
pub use handlers::routes::create_routes;
pub use models::{ContactSubmission, RelayResponse};
pub use services::ContactRelay;

use axum::Router;
use std::{future::IntoFuture, net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub relay: ContactRelay,
}

impl AppState {
    pub fn new(relay: ContactRelay) -> Self {
        Self {
            app_name: "BahBeta Contact Relay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            relay,
        }
    }

    /// Builds the SMTP mailer when credentials are present. A mailer that cannot be built
    /// (for example, a username that is not an email address) is logged and treated like
    /// missing credentials.
    pub fn from_config(config: &AppConfig, credentials: Option<&SmtpCredentials>) -> Self {
        let mailer: Option<Arc<dyn Mailer>> = match credentials {
            Some(credentials) => match SmtpMailer::new(&config.smtp, credentials) {
                Ok(mailer) => Some(Arc::new(mailer)),
                Err(e) => {
                    warn!("Failed to initialize SMTP mailer: {}", e);
                    None
                }
            },
            None => {
                warn!(
                    "{} / {} not set; contact submissions will be answered with the fallback message",
                    config::settings::USERNAME_VAR,
                    config::settings::PASSWORD_VAR
                );
                None
            }
        };

        Self::new(ContactRelay::from_option(mailer).with_body_logging(config.logging.log_bodies))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = create_routes();

    if let Some(cors) = middleware::cors::cors_layer_from_config(&config.cors) {
        router = router.layer(cors);
    }

    middleware::logging::with_request_logging(router).with_state(state)
}

pub async fn run_server(
    app: Router,
    addr: SocketAddr,
    shutdown_timeout: Duration,
) -> std::io::Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    // In-flight requests get `shutdown_timeout` to finish once the signal arrives.
    tokio::select! {
        result = server => result?,
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!("Graceful shutdown timed out after {:?}", shutdown_timeout);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
