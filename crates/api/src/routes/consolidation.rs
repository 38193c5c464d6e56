//! Monthly consolidation routes.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use financas_core::consolidation::{ConsolidationResult, ConsolidationService};
use financas_db::EntryRepository;
use financas_shared::AppError;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError, extractors::QueryParams};

/// Creates the consolidation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/consolidacoes/mensal", get(monthly_consolidation))
}

/// Query parameters for the monthly consolidation.
#[derive(Debug, Deserialize)]
pub struct ConsolidationQuery {
    /// Target month, `YYYY-MM`.
    pub competencia: Option<String>,
}

/// GET `/consolidacoes/mensal?competencia=YYYY-MM` - Consolidate one month.
async fn monthly_consolidation(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ConsolidationQuery>,
) -> Result<Json<ConsolidationResult>, ApiError> {
    let Some(token) = query.competencia else {
        return Err(AppError::field(
            &["query", "competencia"],
            "campo obrigatorio",
            "value_error.missing",
        )
        .into());
    };

    let store = EntryRepository::new((*state.db).clone(), state.owner);
    let service = ConsolidationService::new(Arc::new(store));
    let result = service.consolidate_token(&token).await?;

    info!(
        competencia = %result.competencia,
        saldo = %result.balance,
        "Month consolidated"
    );

    Ok(Json(result))
}
