//! Consolidation service.

use std::sync::Arc;

use financas_shared::types::Competencia;

use super::aggregate::consolidate;
use super::error::{ConsolidationError, StoreError};
use super::types::ConsolidationResult;
use crate::entry::{Entry, EntryKind};

/// Read access to stored entries.
///
/// This trait is implemented by the db crate to provide actual database
/// operations, and by in-memory fakes in tests.
pub trait EntryStore: Send + Sync {
    /// Entries of the given kinds whose competência equals `competencia`.
    fn entries_by_type_and_competencia(
        &self,
        kinds: &[EntryKind],
        competencia: Competencia,
    ) -> impl std::future::Future<Output = Result<Vec<Entry>, StoreError>> + Send;

    /// Installment purchases whose first installment is due on or before
    /// `competencia`.
    fn installment_entries_up_to(
        &self,
        competencia: Competencia,
    ) -> impl std::future::Future<Output = Result<Vec<Entry>, StoreError>> + Send;
}

/// Service computing monthly consolidations from an injected store.
///
/// Stateless: every call reads the store afresh and never writes to it.
pub struct ConsolidationService<S: EntryStore> {
    store: Arc<S>,
}

impl<S: EntryStore> ConsolidationService<S> {
    /// Creates a new consolidation service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Consolidates one competência.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a stored installment purchase
    /// violates its invariants.
    pub async fn consolidate_month(
        &self,
        target: Competencia,
    ) -> Result<ConsolidationResult, ConsolidationError> {
        let income = self
            .store
            .entries_by_type_and_competencia(&[EntryKind::Entrada], target)
            .await?;
        let recurring = self
            .store
            .entries_by_type_and_competencia(&EntryKind::RECURRING, target)
            .await?;
        let installments = self.store.installment_entries_up_to(target).await?;

        consolidate(
            target,
            income.iter().chain(&recurring).chain(&installments),
        )
    }

    /// Parses a raw `YYYY-MM` token, then consolidates it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCompetencia` for a malformed token, otherwise as
    /// [`Self::consolidate_month`].
    pub async fn consolidate_token(
        &self,
        token: &str,
    ) -> Result<ConsolidationResult, ConsolidationError> {
        let target: Competencia = token.parse()?;
        self.consolidate_month(target).await
    }
}
