//! Entry (lancamento) types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use financas_shared::types::{CategoryId, Competencia, EntryId, PaymentMethodId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

/// Discriminant of an entry, as it appears in `tipo_lancamento`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Income.
    Entrada,
    /// Fixed recurring expense.
    Fixo,
    /// Variable recurring expense.
    Variavel,
    /// Installment purchase.
    Parcelado,
}

impl EntryKind {
    /// Recurring expense kinds, counted in full in their own month.
    pub const RECURRING: [Self; 2] = [Self::Fixo, Self::Variavel];

    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entrada => "ENTRADA",
            Self::Fixo => "FIXO",
            Self::Variavel => "VARIAVEL",
            Self::Parcelado => "PARCELADO",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRADA" => Ok(Self::Entrada),
            "FIXO" => Ok(Self::Fixo),
            "VARIAVEL" => Ok(Self::Variavel),
            "PARCELADO" => Ok(Self::Parcelado),
            _ => Err(format!("Unknown entry kind: {s}")),
        }
    }
}

/// Income payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Income {
    /// Amount received.
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Fixed or variable expense payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringExpense {
    /// Category reference.
    #[serde(rename = "categoria_id")]
    pub category_id: CategoryId,
    /// Payment method reference.
    #[serde(rename = "forma_pagamento_id")]
    pub payment_method_id: PaymentMethodId,
    /// Amount owed for the month.
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Whether the expense has been paid. Does not affect consolidation.
    #[serde(rename = "pago")]
    pub paid: bool,
}

/// Installment purchase payload.
///
/// The owning entry's competência is the month the first installment is due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentPurchase {
    /// Category reference.
    #[serde(rename = "categoria_id")]
    pub category_id: CategoryId,
    /// Payment method reference.
    #[serde(rename = "forma_pagamento_id")]
    pub payment_method_id: PaymentMethodId,
    /// Total amount spread across every installment.
    #[serde(rename = "valor_total", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Number of installments, at least 1.
    #[serde(rename = "numero_parcelas")]
    pub installments: u32,
}

/// Type-specific part of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tipo_lancamento")]
pub enum EntryDetail {
    /// `ENTRADA`
    #[serde(rename = "ENTRADA")]
    Income(Income),
    /// `FIXO`
    #[serde(rename = "FIXO")]
    Fixed(RecurringExpense),
    /// `VARIAVEL`
    #[serde(rename = "VARIAVEL")]
    Variable(RecurringExpense),
    /// `PARCELADO`
    #[serde(rename = "PARCELADO")]
    Installment(InstallmentPurchase),
}

impl EntryDetail {
    /// Returns the kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Income(_) => EntryKind::Entrada,
            Self::Fixed(_) => EntryKind::Fixo,
            Self::Variable(_) => EntryKind::Variavel,
            Self::Installment(_) => EntryKind::Parcelado,
        }
    }

    /// Category reference, if the kind carries one.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        match self {
            Self::Income(_) => None,
            Self::Fixed(e) | Self::Variable(e) => Some(e.category_id),
            Self::Installment(p) => Some(p.category_id),
        }
    }

    /// Payment method reference, if the kind carries one.
    #[must_use]
    pub const fn payment_method_id(&self) -> Option<PaymentMethodId> {
        match self {
            Self::Income(_) => None,
            Self::Fixed(e) | Self::Variable(e) => Some(e.payment_method_id),
            Self::Installment(p) => Some(p.payment_method_id),
        }
    }
}

/// A validated entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Free-form description.
    pub name: String,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Accounting month.
    pub competencia: Competencia,
    /// Type-specific fields.
    pub detail: EntryDetail,
}

impl NewEntry {
    /// Assigns identity and ownership, producing a storable entry.
    #[must_use]
    pub fn into_entry(self, id: EntryId, user_id: UserId) -> Entry {
        Entry {
            id,
            user_id,
            name: self.name,
            date: self.date,
            competencia: self.competencia,
            detail: self.detail,
        }
    }
}

/// A stored entry. Entries are immutable once created.
///
/// Serializes to the flat shape `{id, usuario_id, nome, data, competencia,
/// tipo_lancamento, ...type fields}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// Owner.
    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
    /// Free-form description.
    #[serde(rename = "nome")]
    pub name: String,
    /// Calendar date of the event.
    #[serde(rename = "data")]
    pub date: NaiveDate,
    /// Accounting month.
    pub competencia: Competencia,
    /// Type-specific fields.
    #[serde(flatten)]
    pub detail: EntryDetail,
}

impl Entry {
    /// Returns the kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.detail.kind()
    }
}
