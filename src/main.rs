//! Skyfall Match Server - match lifecycle engine for last-team-standing arenas
//!
//! This is the main entry point for the match server. It handles:
//! - Loading the games definition file and building the match registry
//! - Wiring global event dispatchers (hunger pinning) to the registry
//! - Running until the host process is asked to shut down

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyfall_match_server::app::{AppState, LogGateway};
use skyfall_match_server::config::{Config, GamesFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Skyfall Match Server");
    info!("Games file: {}", config.games_file.display());

    // Load match definitions and build the registry
    let games = GamesFile::load(&config.games_file)?;
    let state = AppState::new(config, &games, Arc::new(LogGateway));

    info!(
        matches = state.registry.active_matches(),
        "Match registry initialised"
    );
    for handle in state.registry.handles() {
        let core = handle.core();
        info!(
            game = %handle.name(),
            display_name = %core.display_name(),
            world = %core.world_name(),
            "Match ready"
        );
    }

    // The host engine drives joins, ticks, and events from here on
    shutdown_signal().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
