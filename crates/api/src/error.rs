//! Mapping of application errors to HTTP responses.
//!
//! Every error body has a single `detail` field: a list of field errors for
//! validation failures, a message otherwise.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use financas_core::consolidation::ConsolidationError;
use financas_core::reference::{DUPLICATE_MESSAGE, ReferenceKind};
use financas_db::{EntryError, ReferenceError};
use financas_shared::AppError;
use serde_json::json;
use tracing::{debug, error};

/// Message returned when storage fails.
pub const DATABASE_MESSAGE: &str = "erro ao acessar banco";

/// Message returned for unexpected failures.
pub const INTERNAL_MESSAGE: &str = "erro interno";

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Maps a repository error of the given reference list.
    pub fn reference(kind: ReferenceKind, err: ReferenceError) -> Self {
        match err {
            ReferenceError::DuplicateName(_) => {
                Self(AppError::Conflict(DUPLICATE_MESSAGE.to_string()))
            }
            ReferenceError::NotFound(_) => {
                Self(AppError::NotFound(kind.not_found_message().to_string()))
            }
            ReferenceError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = self.0.error_code();

        let body = match self.0 {
            AppError::Validation(errors) => {
                debug!(code, fields = errors.len(), "Request rejected");
                json!({ "detail": errors })
            }
            AppError::NotFound(message) | AppError::Conflict(message) => {
                debug!(code, detail = %message, "Request rejected");
                json!({ "detail": message })
            }
            AppError::Database(message) => {
                error!(code, error = %message, "Database error");
                json!({ "detail": DATABASE_MESSAGE })
            }
            AppError::Internal(message) => {
                error!(code, error = %message, "Internal error");
                json!({ "detail": INTERNAL_MESSAGE })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl From<EntryError> for ApiError {
    fn from(value: EntryError) -> Self {
        let app = match value {
            EntryError::CategoryNotFound(_) => {
                AppError::NotFound(ReferenceKind::Category.not_found_message().to_string())
            }
            EntryError::PaymentMethodNotFound(_) => {
                AppError::NotFound(ReferenceKind::PaymentMethod.not_found_message().to_string())
            }
            EntryError::AmountOutOfRange(_) => AppError::field(
                &["body"],
                "valor fora do intervalo suportado",
                "value_error",
            ),
            err @ (EntryError::CorruptRow { .. } | EntryError::Database(_)) => {
                AppError::Database(err.to_string())
            }
        };
        Self(app)
    }
}

impl From<ConsolidationError> for ApiError {
    fn from(value: ConsolidationError) -> Self {
        let app = match value {
            ConsolidationError::InvalidCompetencia(_) => AppError::field(
                &["query", "competencia"],
                "formato invalido (YYYY-MM)",
                "value_error",
            ),
            ConsolidationError::Store(e) => AppError::Database(e.to_string()),
            err @ (ConsolidationError::InvalidInstallmentCount(_)
            | ConsolidationError::InstallmentIndexOutOfRange { .. }) => {
                AppError::Internal(err.to_string())
            }
        };
        Self(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use financas_core::consolidation::StoreError;
    use financas_shared::types::CategoryId;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use uuid::Uuid;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_422_with_field_list() {
        let res = ApiError(AppError::field(
            &["body", "nome"],
            "campo obrigatorio",
            "value_error.missing",
        ))
        .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(res).await,
            json!({
                "detail": [{
                    "loc": ["body", "nome"],
                    "msg": "campo obrigatorio",
                    "type": "value_error.missing"
                }]
            })
        );
    }

    #[tokio::test]
    async fn duplicate_maps_to_409() {
        let res = ApiError::reference(
            ReferenceKind::PaymentMethod,
            ReferenceError::DuplicateName("Pix".to_string()),
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(res).await, json!({"detail": "recurso ja existente"}));
    }

    #[tokio::test]
    async fn unknown_reference_maps_to_404() {
        let res = ApiError::reference(
            ReferenceKind::Category,
            ReferenceError::NotFound(Uuid::nil()),
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await, json!({"detail": "categoria nao encontrada"}));

        let res = ApiError::from(EntryError::CategoryNotFound(CategoryId::new())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_failure_hides_details() {
        let res = ApiError::from(ConsolidationError::Store(StoreError::new("disk I/O error")))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(res).await, json!({"detail": "erro ao acessar banco"}));
    }

    #[test]
    fn installment_invariant_maps_to_500() {
        let res = ApiError::from(ConsolidationError::InvalidInstallmentCount(0)).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
