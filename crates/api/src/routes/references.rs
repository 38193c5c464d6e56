//! Category and payment method routes.
//!
//! Both lists expose the same CRUD surface; handlers are generic over a
//! marker type naming the list.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use financas_core::reference::{Reference, ReferenceKind, validate_reference_name};
use financas_db::ReferenceRepository;
use financas_shared::AppError;
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    extractors::{JsonBody, parse_path_id},
};

/// A reference list exposed over HTTP.
pub trait ReferenceList: Send + Sync + 'static {
    /// Which list.
    const KIND: ReferenceKind;
    /// Collection path.
    const COLLECTION: &'static str;
    /// Item path.
    const ITEM: &'static str;
}

/// `/categorias`
pub struct Categories;

impl ReferenceList for Categories {
    const KIND: ReferenceKind = ReferenceKind::Category;
    const COLLECTION: &'static str = "/categorias";
    const ITEM: &'static str = "/categorias/{categoria_id}";
}

/// `/formas-pagamento`
pub struct PaymentMethods;

impl ReferenceList for PaymentMethods {
    const KIND: ReferenceKind = ReferenceKind::PaymentMethod;
    const COLLECTION: &'static str = "/formas-pagamento";
    const ITEM: &'static str = "/formas-pagamento/{forma_pagamento_id}";
}

/// Creates the CRUD routes of one reference list.
pub fn routes<L: ReferenceList>() -> Router<AppState> {
    Router::new()
        .route(L::COLLECTION, get(list::<L>).post(create::<L>))
        .route(
            L::ITEM,
            get(get_one::<L>).put(rename::<L>).delete(delete::<L>),
        )
}

fn repository<L: ReferenceList>(state: &AppState) -> ReferenceRepository {
    ReferenceRepository::new((*state.db).clone(), L::KIND, state.owner)
}

/// POST collection - Create a record.
async fn create<L: ReferenceList>(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody,
) -> Result<(StatusCode, Json<Reference>), ApiError> {
    let name = validate_reference_name(&payload).map_err(AppError::Validation)?;

    let created = repository::<L>(&state)
        .create(&name)
        .await
        .map_err(|e| ApiError::reference(L::KIND, e))?;

    info!(kind = ?L::KIND, id = %created.id, "Reference created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET collection - List records.
async fn list<L: ReferenceList>(
    State(state): State<AppState>,
) -> Result<Json<Vec<Reference>>, ApiError> {
    let records = repository::<L>(&state)
        .list()
        .await
        .map_err(|e| ApiError::reference(L::KIND, e))?;
    Ok(Json(records))
}

/// GET item - Fetch one record.
async fn get_one<L: ReferenceList>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Reference>, ApiError> {
    let id = parse_path_id(L::KIND.path_param(), &raw_id)?;
    let record = repository::<L>(&state)
        .get(id)
        .await
        .map_err(|e| ApiError::reference(L::KIND, e))?;
    Ok(Json(record))
}

/// PUT item - Rename a record.
async fn rename<L: ReferenceList>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(payload): JsonBody,
) -> Result<Json<Reference>, ApiError> {
    let id = parse_path_id(L::KIND.path_param(), &raw_id)?;
    let name = validate_reference_name(&payload).map_err(AppError::Validation)?;

    let updated = repository::<L>(&state)
        .rename(id, &name)
        .await
        .map_err(|e| ApiError::reference(L::KIND, e))?;

    info!(kind = ?L::KIND, id = %id, "Reference renamed");
    Ok(Json(updated))
}

/// DELETE item - Remove a record.
async fn delete<L: ReferenceList>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(L::KIND.path_param(), &raw_id)?;
    repository::<L>(&state)
        .delete(id)
        .await
        .map_err(|e| ApiError::reference(L::KIND, e))?;

    info!(kind = ?L::KIND, id = %id, "Reference deleted");
    Ok(StatusCode::NO_CONTENT)
}
