//! Book Information Service
//!
//! REST API server for the book information inventory.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

use bookinfo_server::{
    api,
    config::{AppConfig, LoggingConfig, StorageBackend},
    repository::{
        DynBookInformationRepository, InMemoryBookInformationRepository,
        PgBookInformationRepository,
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Held until shutdown so buffered file logs are flushed
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting BookInfo Service v{}", env!("CARGO_PKG_VERSION"));

    let repository: DynBookInformationRepository = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(&config.database.url)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;

            tracing::info!("Database migrations completed");
            Arc::new(PgBookInformationRepository::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Arc::new(InMemoryBookInformationRepository::new())
        }
    };

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .with_context(|| format!("invalid host address '{}'", config.server.host))?,
        config.server.port,
    );

    let state = AppState::new(config, repository);
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("BookInfo Service is stopped");
    Ok(())
}

/// Install the global subscriber: console output in the configured format,
/// plus a daily rolling file when a log directory is configured.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bookinfo_server={},tower_http=debug", logging.level).into()
    });

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if logging.format == "json" {
        layers.push(tracing_subscriber::fmt::layer().json().boxed());
    } else {
        layers.push(tracing_subscriber::fmt::layer().boxed());
    }

    let guard = logging.directory.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "bookinfo.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
        guard
    });

    // A second init (e.g. under a test harness) is not fatal
    if let Err(e) = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        eprintln!("tracing already initialized: {e}");
    }

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
