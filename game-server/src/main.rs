use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use game_persistence::{
    GameHistoryRepository, SqliteKeyValueStore, connection::connect_and_migrate,
};
use game_server::{config::Config, create_routes, scorekeeper::Scorekeeper};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting CallBreak scorekeeper...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let history = GameHistoryRepository::new(Arc::new(SqliteKeyValueStore::new(db)));
    let scorekeeper = Arc::new(Scorekeeper::load(history, config.completion_delay()).await);

    let routes = create_routes(scorekeeper);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            error!("Invalid HOST {:?}: {}", config.host, e);
            std::process::exit(1);
        }
    };

    let bound = warp::serve(routes).try_bind_with_graceful_shutdown((ip, config.port), async {
        shutdown_signal().await;
    });
    let (addr, server) = match bound {
        Ok(bound) => bound,
        Err(e) => {
            error!("Failed to bind {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    info!(
        "Scorekeeper started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Scorekeeper shutdown complete.");
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                let _ = signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl+c: {}", e);
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
