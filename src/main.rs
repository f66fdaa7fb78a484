use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use ticketing_server::config::{create_cors_layer, Config, StorageBackend};
use ticketing_server::routes::create_routes;
use ticketing_server::state::AppState;
use ticketing_server::store::PgStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    tracing::info!(storage = %config.storage, "Configuration loaded");

    // The pool is the one process-wide persistence resource: opened here,
    // closed after the server has drained.
    let (state, pool) = match config.storage {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            tracing::info!("Successfully connected to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            tracing::info!("Migrations run successfully");

            let state = AppState::new(Arc::new(PgStore::new(pool.clone())));
            (state, Some(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on shutdown");
            (AppState::in_memory(), None)
        }
    };

    let app = create_routes(
        state,
        create_cors_layer(config.cors_allowed_origins.as_deref()),
    );

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .expect("Failed to bind address");
    tracing::info!(
        "Server running at http://{}",
        listener.local_addr().expect("Listener has a local address")
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
}

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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
