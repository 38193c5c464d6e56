//! Financas API Server
//!
//! Main entry point for the Financas backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use financas_api::{AppState, create_router};
use financas_db::{
    connect,
    migration::{Migrator, MigratorTrait},
};
use financas_shared::AppConfig;
use financas_shared::types::UserId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "financas=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to connect to {}", config.database.url))?;
    info!("Connected to database");

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations applied");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        owner: UserId::from_uuid(config.owner.user_id),
    };
    info!(owner = %state.owner, "Serving single owner");

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
