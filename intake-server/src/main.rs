//! Intake Server - client onboarding endpoint backed by Airtable.
//!
//! Loads configuration once, builds the Airtable client if the
//! configuration is complete, and serves the submission endpoint until
//! SIGINT or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use intake::{router, AirtableClient, AppState, Config, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal in deployed environments
    dotenvy::dotenv().ok();

    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("intake_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        airtable_api_key_set = config.airtable_api_key.is_some(),
        airtable_base_id_set = config.airtable_base_id.is_some(),
        airtable_table_name_set = config.airtable_table_name.is_some(),
        airtable_timeout_ms = config.airtable_timeout_ms,
        cors_origins = ?config.cors_allowed_origins,
        "config_loaded"
    );

    // Requests fail with a configuration error until this is fixed
    let store = build_store(&config);

    let state = AppState::new(config.clone(), store);
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "intake_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("intake_server_shutdown_complete");

    Ok(())
}

/// Build the Airtable record store, or `None` if it cannot be configured.
fn build_store(config: &Config) -> Option<Arc<dyn RecordStore>> {
    let settings = match config.airtable() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(
                missing = ?config.missing_airtable_vars(),
                error = %e,
                "airtable_config_incomplete"
            );
            return None;
        }
    };

    match AirtableClient::new(settings) {
        Ok(client) => {
            info!(endpoint = %client.endpoint(), "airtable_client_created");
            Some(Arc::new(client))
        }
        Err(e) => {
            error!(error = %e, "airtable_client_build_failed");
            None
        }
    }
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("intake_server_shutting_down");
}
