//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod consolidation;
pub mod entries;
pub mod health;
pub mod references;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(entries::routes())
        .merge(references::routes::<references::Categories>())
        .merge(references::routes::<references::PaymentMethods>())
        .merge(consolidation::routes())
}
