use actix_web::{App, HttpServer};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_lifecycle::api::{self, AppState};
use order_lifecycle::config::Config;
use order_lifecycle::domain::order::{OrderRepository, OrderService};
use order_lifecycle::metrics::Metrics;
use order_lifecycle::persistence::{run_migrations, InMemoryOrderRepository, PgOrderRepository};
use order_lifecycle::utils::{retry_on_transient, RetryConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_lifecycle=debug")),
        )
        .init();

    let config = Config::parse();
    tracing::info!("🚀 Starting order lifecycle service");

    // === 1. Storage ===
    let repository: Arc<dyn OrderRepository> = if config.in_memory {
        tracing::warn!("Using in-memory storage; orders are lost on exit");
        Arc::new(InMemoryOrderRepository::new())
    } else {
        Arc::new(PgOrderRepository::new(connect(&config).await?))
    };

    // === 2. Service and metrics ===
    let service = OrderService::new(repository).with_deadline(config.storage_timeout());
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );

    let state = AppState::new(service, metrics);

    // === 3. HTTP server ===
    let bind = (config.server_host.clone(), config.server_port);
    tracing::info!("Server listening on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || App::new().configure(api::configure(state.clone())))
        .bind(bind)?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect(config: &Config) -> anyhow::Result<sqlx::PgPool> {
    tracing::info!("Connecting to PostgreSQL...");

    let url = config.database_url();
    let pool = retry_on_transient(RetryConfig::startup(), |attempt| {
        tracing::debug!(attempt = attempt, "Opening connection pool");
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.storage_timeout())
            .connect(&url)
    })
    .await
    .into_result()?;

    tracing::info!("Database connection successfully established");

    if config.skip_migrations {
        tracing::info!("Skipping migrations");
    } else {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}
