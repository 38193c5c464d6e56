//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use financas_shared::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Raw JSON request body.
///
/// Payloads are validated field by field after extraction, so the body is
/// kept as an untyped [`Value`]. A body that is not JSON is rejected with a
/// field error at `["body"]`.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError(AppError::field(&["body"], e.body_text(), "value_error")))?;

        serde_json::from_slice(&bytes).map(Self).map_err(|_| {
            ApiError(AppError::field(
                &["body"],
                "JSON invalido",
                "value_error.jsondecode",
            ))
        })
    }
}

/// Query string deserialized into `T`.
///
/// A query string that does not fit `T` (a repeated key, bad percent
/// encoding) is rejected with a field error at `["query"]`.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::try_from_uri(&parts.uri)
            .map(|Query(params)| Self(params))
            .map_err(|_| {
                ApiError(AppError::field(
                    &["query"],
                    "query string invalida",
                    "value_error.query",
                ))
            })
    }
}

/// Parses a path segment as a UUID, reporting failures at `["path", param]`.
///
/// # Errors
///
/// Returns a validation error with message `uuid invalido`.
pub fn parse_path_id(param: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError(AppError::field(&["path", param], "uuid invalido", "value_error")))
}
