//! Consolidation data types.

use financas_shared::types::Competencia;
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals and balance of one competência.
///
/// Every amount carries exactly two decimals. Serialized with the wire
/// field names `total_entradas`, `total_gastos`, `total_investimentos` and
/// `saldo`, as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidationResult {
    /// Consolidated month.
    pub competencia: Competencia,
    /// Sum of income entries.
    #[serde(rename = "total_entradas", with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// Recurring expenses plus installment shares due this month.
    #[serde(rename = "total_gastos", with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    /// Always zero; no investment entry type exists yet.
    #[serde(rename = "total_investimentos", with = "rust_decimal::serde::float")]
    pub total_investments: Decimal,
    /// `total_income - total_expenses - total_investments`.
    #[serde(rename = "saldo", with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}
