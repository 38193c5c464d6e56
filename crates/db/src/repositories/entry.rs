//! Entry (lancamento) repository.
//!
//! Also the database-backed [`EntryStore`] the consolidation service reads
//! through.

use financas_core::consolidation::{EntryStore, StoreError};
use financas_core::entry::{
    Entry, EntryDetail, EntryKind, Income, InstallmentPurchase, NewEntry, RecurringExpense,
};
use financas_core::reference::ReferenceKind;
use financas_shared::types::money::{from_cents, to_cents};
use financas_shared::types::{CategoryId, Competencia, EntryId, PaymentMethodId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::reference::{ReferenceError, ReferenceRepository};
use crate::entities::lancamentos;

/// Error types for entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The referenced category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The referenced payment method does not exist.
    #[error("Payment method not found: {0}")]
    PaymentMethodNotFound(PaymentMethodId),

    /// An amount does not fit in integer cents.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(Decimal),

    /// A stored row cannot be read back as an entry.
    #[error("Corrupt entry row {id}: {reason}")]
    CorruptRow {
        /// Row id.
        id: uuid::Uuid,
        /// What is wrong with it.
        reason: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReferenceError> for EntryError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::Database(db) => Self::Database(db),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}

/// Entry repository for one owner.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
    owner: UserId,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, owner: UserId) -> Self {
        Self { db, owner }
    }

    /// Stores a validated entry under a fresh id.
    ///
    /// Expense entries must reference an existing category and payment
    /// method. Amounts are stored rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` or `PaymentMethodNotFound` for dangling
    /// references, checked in that order.
    pub async fn create(&self, new_entry: NewEntry) -> Result<Entry, EntryError> {
        if let Some(category_id) = new_entry.detail.category_id() {
            let categories =
                ReferenceRepository::new(self.db.clone(), ReferenceKind::Category, self.owner);
            if !categories.exists(category_id.into_inner()).await? {
                return Err(EntryError::CategoryNotFound(category_id));
            }
        }
        if let Some(payment_method_id) = new_entry.detail.payment_method_id() {
            let payment_methods = ReferenceRepository::new(
                self.db.clone(),
                ReferenceKind::PaymentMethod,
                self.owner,
            );
            if !payment_methods.exists(payment_method_id.into_inner()).await? {
                return Err(EntryError::PaymentMethodNotFound(payment_method_id));
            }
        }

        let entry = new_entry.into_entry(EntryId::new(), self.owner);
        let model = to_active_model(&entry)?.insert(&self.db).await?;

        tracing::debug!(
            id = %entry.id,
            kind = %entry.kind(),
            competencia = %entry.competencia,
            "Entry created"
        );

        model_to_entry(model)
    }

    /// Lists every entry of the owner in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list(&self) -> Result<Vec<Entry>, EntryError> {
        let models = lancamentos::Entity::find()
            .filter(lancamentos::Column::UsuarioId.eq(self.owner.into_inner()))
            .order_by_asc(lancamentos::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_entry).collect()
    }

    /// Entries of the given kinds stored under `competencia`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list_by_kinds_in(
        &self,
        kinds: &[EntryKind],
        competencia: Competencia,
    ) -> Result<Vec<Entry>, EntryError> {
        let models = lancamentos::Entity::find()
            .filter(lancamentos::Column::UsuarioId.eq(self.owner.into_inner()))
            .filter(lancamentos::Column::TipoLancamento.is_in(kinds.iter().map(|k| k.as_str())))
            .filter(lancamentos::Column::Competencia.eq(competencia.to_string()))
            .order_by_asc(lancamentos::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_entry).collect()
    }

    /// Installment purchases whose first installment is due on or before
    /// `competencia`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list_installments_up_to(
        &self,
        competencia: Competencia,
    ) -> Result<Vec<Entry>, EntryError> {
        // YYYY-MM text sorts chronologically.
        let models = lancamentos::Entity::find()
            .filter(lancamentos::Column::UsuarioId.eq(self.owner.into_inner()))
            .filter(lancamentos::Column::TipoLancamento.eq(EntryKind::Parcelado.as_str()))
            .filter(lancamentos::Column::Competencia.lte(competencia.to_string()))
            .order_by_asc(lancamentos::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(model_to_entry).collect()
    }
}

impl EntryStore for EntryRepository {
    async fn entries_by_type_and_competencia(
        &self,
        kinds: &[EntryKind],
        competencia: Competencia,
    ) -> Result<Vec<Entry>, StoreError> {
        self.list_by_kinds_in(kinds, competencia)
            .await
            .map_err(StoreError::new)
    }

    async fn installment_entries_up_to(
        &self,
        competencia: Competencia,
    ) -> Result<Vec<Entry>, StoreError> {
        self.list_installments_up_to(competencia)
            .await
            .map_err(StoreError::new)
    }
}

fn cents(amount: Decimal) -> Result<i64, EntryError> {
    to_cents(amount).ok_or(EntryError::AmountOutOfRange(amount))
}

fn to_active_model(entry: &Entry) -> Result<lancamentos::ActiveModel, EntryError> {
    let mut model = lancamentos::ActiveModel {
        id: Set(entry.id.into_inner()),
        usuario_id: Set(entry.user_id.into_inner()),
        nome: Set(entry.name.clone()),
        data: Set(entry.date),
        competencia: Set(entry.competencia.to_string()),
        tipo_lancamento: Set(entry.kind().as_str().to_string()),
        categoria_id: Set(entry.detail.category_id().map(CategoryId::into_inner)),
        forma_pagamento_id: Set(entry
            .detail
            .payment_method_id()
            .map(PaymentMethodId::into_inner)),
        valor_centavos: Set(None),
        pago: Set(None),
        valor_total_centavos: Set(None),
        numero_parcelas: Set(None),
    };

    match &entry.detail {
        EntryDetail::Income(income) => {
            model.valor_centavos = Set(Some(cents(income.amount)?));
        }
        EntryDetail::Fixed(expense) | EntryDetail::Variable(expense) => {
            model.valor_centavos = Set(Some(cents(expense.amount)?));
            model.pago = Set(Some(expense.paid));
        }
        EntryDetail::Installment(purchase) => {
            let installments = i32::try_from(purchase.installments).map_err(|_| {
                EntryError::CorruptRow {
                    id: entry.id.into_inner(),
                    reason: format!("{} installments", purchase.installments),
                }
            })?;
            model.valor_total_centavos = Set(Some(cents(purchase.total_amount)?));
            model.numero_parcelas = Set(Some(installments));
        }
    }

    Ok(model)
}

fn model_to_entry(model: lancamentos::Model) -> Result<Entry, EntryError> {
    let id = model.id;
    let corrupt = |reason: String| EntryError::CorruptRow { id, reason };
    let required = |value: Option<i64>, column: &str| {
        value.ok_or_else(|| corrupt(format!("{column} is null")))
    };

    let kind: EntryKind = model.tipo_lancamento.parse().map_err(corrupt)?;
    let competencia: Competencia = model
        .competencia
        .parse()
        .map_err(|e: financas_shared::types::CompetenciaError| corrupt(e.to_string()))?;

    let category_id = || {
        model
            .categoria_id
            .map(CategoryId::from_uuid)
            .ok_or_else(|| corrupt("categoria_id is null".to_string()))
    };
    let payment_method_id = || {
        model
            .forma_pagamento_id
            .map(PaymentMethodId::from_uuid)
            .ok_or_else(|| corrupt("forma_pagamento_id is null".to_string()))
    };

    let detail = match kind {
        EntryKind::Entrada => EntryDetail::Income(Income {
            amount: from_cents(required(model.valor_centavos, "valor_centavos")?),
        }),
        EntryKind::Fixo | EntryKind::Variavel => {
            let expense = RecurringExpense {
                category_id: category_id()?,
                payment_method_id: payment_method_id()?,
                amount: from_cents(required(model.valor_centavos, "valor_centavos")?),
                paid: model
                    .pago
                    .ok_or_else(|| corrupt("pago is null".to_string()))?,
            };
            if kind == EntryKind::Fixo {
                EntryDetail::Fixed(expense)
            } else {
                EntryDetail::Variable(expense)
            }
        }
        EntryKind::Parcelado => {
            let installments = model
                .numero_parcelas
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| corrupt("numero_parcelas is invalid".to_string()))?;
            EntryDetail::Installment(InstallmentPurchase {
                category_id: category_id()?,
                payment_method_id: payment_method_id()?,
                total_amount: from_cents(required(
                    model.valor_total_centavos,
                    "valor_total_centavos",
                )?),
                installments,
            })
        }
    };

    Ok(Entry {
        id: EntryId::from_uuid(id),
        user_id: UserId::from_uuid(model.usuario_id),
        name: model.nome,
        date: model.data,
        competencia,
        detail,
    })
}
