//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Request extractors
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use financas_shared::types::UserId;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Owner of every record this instance reads and writes.
    pub owner: UserId,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
