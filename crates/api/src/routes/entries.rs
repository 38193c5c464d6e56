//! Entry (lancamento) routes.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use financas_core::entry::{Entry, validate_new_entry};
use financas_db::EntryRepository;
use financas_shared::AppError;
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody};

/// Creates the entry routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/lancamentos", get(list_entries).post(create_entry))
}

/// POST `/lancamentos` - Create an entry.
async fn create_entry(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let new_entry = validate_new_entry(&payload).map_err(AppError::Validation)?;

    let repo = EntryRepository::new((*state.db).clone(), state.owner);
    let entry = repo.create(new_entry).await?;

    info!(
        entry_id = %entry.id,
        kind = %entry.kind(),
        competencia = %entry.competencia,
        "Entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET `/lancamentos` - List every entry.
async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    let repo = EntryRepository::new((*state.db).clone(), state.owner);
    let entries = repo.list().await?;
    Ok(Json(entries))
}
