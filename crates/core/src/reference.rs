//! Categories and payment methods.
//!
//! Both are flat, per-user lists of unique names referenced by expense entries.

use financas_shared::FieldError;
use financas_shared::types::UserId;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::entry::validation::{FieldValidator, require_object};

/// Which reference list an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `categorias`
    Category,
    /// `formas-pagamento`
    PaymentMethod,
}

impl ReferenceKind {
    /// Name of the path parameter carrying the id.
    #[must_use]
    pub const fn path_param(self) -> &'static str {
        match self {
            Self::Category => "categoria_id",
            Self::PaymentMethod => "forma_pagamento_id",
        }
    }

    /// Message returned when an id does not resolve.
    #[must_use]
    pub const fn not_found_message(self) -> &'static str {
        match self {
            Self::Category => "categoria nao encontrada",
            Self::PaymentMethod => "forma de pagamento nao encontrada",
        }
    }
}

/// A stored category or payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Unique identifier.
    pub id: Uuid,
    /// Owner.
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
    /// Display name, unique per owner.
    #[serde(rename = "nome")]
    pub name: String,
}

/// Message returned when a name is already taken.
pub const DUPLICATE_MESSAGE: &str = "recurso ja existente";

/// Validates a `{"nome": "..."}` payload and returns the name.
///
/// # Errors
///
/// Returns the field errors if the body is not an object or `nome` is
/// missing, not a string, or blank.
pub fn validate_reference_name(payload: &Value) -> Result<String, Vec<FieldError>> {
    let object = require_object(payload)?;
    let mut v = FieldValidator::new("body", object);
    match v.string("nome") {
        Some(name) => Ok(name.to_string()),
        None => Err(v.into_errors()),
    }
}
