//! Money helpers with exact decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` in memory and integer cents at rest.
//! Floats only appear when a value is serialized for a JSON response.

use rust_decimal::prelude::*;

/// Number of fractional digits kept for every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to two decimals using round-half-up (ties away from zero).
///
/// The result always carries exactly two fractional digits, so `5000`
/// becomes `5000.00`.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Converts an amount to integer cents after rounding it to two decimals.
///
/// Returns `None` if the amount does not fit in an `i64`.
#[must_use]
pub fn to_cents(amount: Decimal) -> Option<i64> {
    round_money(amount)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

/// Converts integer cents back to a two-decimal amount.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MONEY_SCALE)
}

/// Reads a JSON number as an exact decimal.
///
/// The number is parsed from its textual form, so `120.5` becomes exactly
/// `120.5` instead of the nearest binary float. Returns `None` for numbers
/// outside the range or precision a `Decimal` can hold.
#[must_use]
pub fn decimal_from_json(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
