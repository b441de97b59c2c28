use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movies_api::config::{ServerConfig, StoreBackend};
use movies_api::router::build_app_router;
use movies_api::state::AppState;
use movies_db::{MemoryMovieStore, MovieRepo, MovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "movies_api=debug,movies_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store,
        "Loaded server configuration"
    );

    // --- Store ---
    let store = build_store(&config).await?;

    // --- App state ---
    let state = AppState { store };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Build the movie store selected by configuration.
///
/// The MongoDB client is created once here and reused by every request.
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn MovieStore>> {
    match (config.store, &config.mongo) {
        (StoreBackend::Mongo, Some(mongo)) => {
            let client = movies_db::connect(&mongo.uri)
                .await
                .context("Failed to create MongoDB client")?;
            let repo = MovieRepo::new(&client, &mongo.database, &mongo.collection);

            repo.ping().await.context("MongoDB health check failed")?;
            tracing::info!(
                database = %mongo.database,
                collection = %mongo.collection,
                "Connected to MongoDB"
            );

            Ok(Arc::new(repo))
        }
        (StoreBackend::Mongo, None) => {
            anyhow::bail!("MongoDB store selected without connection settings")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory movie store; data will not survive a restart");
            Ok(Arc::new(MemoryMovieStore::new()))
        }
    }
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
