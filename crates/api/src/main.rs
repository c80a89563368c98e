use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agenda_api::auth::device_lock::DeviceLock;
use agenda_api::config::ServerConfig;
use agenda_api::router::build_app_router;
use agenda_api::state::AppState;
use agenda_db::repositories::ActivityFieldRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_api=debug,agenda_db=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    agenda_db::ensure_sqlite_dir(&config.database_url)
        .context("Failed to create the database directory")?;

    let pool = agenda_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to open database")?;
    tracing::info!(url = %config.database_url, "Database connection pool created");

    agenda_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    agenda_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    ActivityFieldRepo::seed_catalog(&pool)
        .await
        .context("Failed to seed activity fields")?;

    // --- Device lock ---
    let device_lock = match config.device_pin.as_deref() {
        Some(pin) => DeviceLock::with_pin(pin)
            .map_err(|e| anyhow::anyhow!("Failed to hash DEVICE_PIN: {e}"))?,
        None => {
            tracing::warn!("DEVICE_PIN is not set; restore and reset are unguarded");
            DeviceLock::open()
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        device_lock: Arc::new(device_lock),
    };

    // --- Router ---
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
