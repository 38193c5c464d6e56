//! Monthly aggregation of entries.

use financas_shared::types::Competencia;
use financas_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::allocation::InstallmentAllocator;
use super::error::ConsolidationError;
use super::types::ConsolidationResult;
use crate::entry::{Entry, EntryDetail, InstallmentPurchase};

/// Share of an installment purchase due in `target`.
///
/// `start` is the competência of the first installment. Months before the
/// start or at/after `start + installments` contribute zero.
///
/// # Errors
///
/// Returns an error if the purchase has zero installments.
pub fn installment_share(
    target: Competencia,
    start: Competencia,
    purchase: &InstallmentPurchase,
) -> Result<Decimal, ConsolidationError> {
    let offset = target.index() - start.index();
    match u32::try_from(offset) {
        Ok(index) if index < purchase.installments => {
            InstallmentAllocator::allocate(purchase.total_amount, purchase.installments, index)
        }
        _ if purchase.installments < 1 => Err(ConsolidationError::InvalidInstallmentCount(
            purchase.installments,
        )),
        _ => Ok(Decimal::ZERO),
    }
}

/// Consolidates `target` from a set of entries.
///
/// Income and recurring expenses count only in their own competência, in
/// full, regardless of `pago`. Installment purchases from any month
/// contribute the share due in `target`. Arithmetic is exact; only the
/// returned fields are rounded (half-up, two decimals).
///
/// # Errors
///
/// Returns an error if an installment purchase violates its invariants.
pub fn consolidate<'a, I>(
    target: Competencia,
    entries: I,
) -> Result<ConsolidationResult, ConsolidationError>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_recurring = Decimal::ZERO;
    let mut total_installments = Decimal::ZERO;

    for entry in entries {
        match &entry.detail {
            EntryDetail::Income(income) if entry.competencia == target => {
                total_income += income.amount;
            }
            EntryDetail::Fixed(expense) | EntryDetail::Variable(expense)
                if entry.competencia == target =>
            {
                total_recurring += expense.amount;
            }
            EntryDetail::Installment(purchase) => {
                total_installments += installment_share(target, entry.competencia, purchase)?;
            }
            _ => {}
        }
    }

    let total_expenses = total_recurring + total_installments;
    let total_investments = Decimal::ZERO;
    let balance = total_income - total_expenses - total_investments;

    Ok(ConsolidationResult {
        competencia: target,
        total_income: round_money(total_income),
        total_expenses: round_money(total_expenses),
        total_investments: round_money(total_investments),
        balance: round_money(balance),
    })
}
