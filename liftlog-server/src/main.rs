use anyhow::{Context, Result};
use liftlog::auth::TokenIdentity;
use liftlog::logging::{init_logger, parse_level};
use log::{LevelFilter, info, warn};
use std::sync::Arc;

use liftlog_server::config::ServerConfig;
use liftlog_server::router::build_app_router;
use liftlog_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let level = parse_level(&config.log_level).unwrap_or(LevelFilter::Info);
    init_logger(level);
    if parse_level(&config.log_level).is_none() {
        warn!("Unknown LOG_LEVEL '{}', using info", config.log_level);
    }
    info!("Loaded server configuration for {}", config.bind_addr());

    let pool = liftlog::db::connect(&config.database_url)
        .await
        .context("Failed to open database")?;
    liftlog::db::health_check(&pool).await?;
    info!("Database ready at {}", config.database_url);

    let identity = Arc::new(TokenIdentity::new(config.auth_secret.as_bytes()));
    let addr = config.bind_addr();
    let state = AppState::new(pool.clone(), config, identity);
    let app = build_app_router(state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
