//! Main entry point for the contact relay binary

use anyhow::{Context, Result};
use relay_core::{create_app_with_config, run_server, AppConfig, AppState, SmtpCredentials};
use std::{net::SocketAddr, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("SMTP relay: {}:{}", config.smtp.host, config.smtp.port);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("Invalid bind address")?;

    let credentials = SmtpCredentials::from_env();
    let state = AppState::from_config(&config, credentials.as_ref());

    info!("App: {} v{}", state.app_name, state.version);
    info!(
        email_configured = state.relay.is_configured(),
        cors_enabled = config.cors.enabled,
        "Contact relay ready"
    );

    let app = create_app_with_config(state, &config);

    run_server(
        app,
        addr,
        Duration::from_secs(config.server.shutdown_timeout_seconds),
    )
    .await
    .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        };

        format!(
            "relay_core={default_level},{}={default_level},tower_http={default_level},axum=info",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
