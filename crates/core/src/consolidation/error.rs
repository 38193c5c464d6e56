//! Consolidation error types.

use financas_shared::types::CompetenciaError;
use thiserror::Error;

/// Opaque failure of the entry store (I/O, connectivity, corrupt rows).
#[derive(Debug, Error)]
#[error("entry store error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps any displayable store failure.
    #[must_use]
    pub fn new(err: impl std::fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Errors that can occur while consolidating a month.
#[derive(Debug, Error)]
pub enum ConsolidationError {
    /// The target month is not a valid `YYYY-MM` token.
    #[error(transparent)]
    InvalidCompetencia(#[from] CompetenciaError),

    /// An installment purchase has fewer than one installment.
    #[error("Invalid installment count: {0}")]
    InvalidInstallmentCount(u32),

    /// An installment index outside `0..installments` was requested.
    #[error("Installment index {index} out of range for {installments} installments")]
    InstallmentIndexOutOfRange {
        /// Requested index.
        index: u32,
        /// Number of installments of the purchase.
        installments: u32,
    },

    /// The entry store failed; propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}
