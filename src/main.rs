//! SecureGate Server — realtime security alert gateway
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use securegate_api::AppState;
use securegate_auth::JwtDecoder;
use securegate_core::config::AppConfig;
use securegate_core::error::AppError;
use securegate_realtime::RealtimeEngine;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `SECUREGATE_ENV`
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("SECUREGATE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SecureGate v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);
    let resolver = Arc::new(JwtDecoder::new(&config.auth));
    let realtime = Arc::new(RealtimeEngine::new(config.realtime.clone()));

    let state = AppState::new(config.clone(), realtime.clone(), resolver);
    let app = securegate_api::build_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("SecureGate server listening on {}", addr);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server_task => {
            return flatten_server_result(joined);
        }
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
    realtime.shutdown();
    let _ = stop_tx.send(());

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    match tokio::time::timeout(grace, server_task).await {
        Ok(joined) => flatten_server_result(joined)?,
        Err(_) => tracing::warn!(
            grace_secs = grace.as_secs(),
            "Graceful shutdown timed out, exiting"
        ),
    }

    tracing::info!("SecureGate server shut down gracefully");
    Ok(())
}

fn flatten_server_result(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    joined
        .map_err(|e| AppError::internal(format!("Server task failed: {}", e)))?
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
