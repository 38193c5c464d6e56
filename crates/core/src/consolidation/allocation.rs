//! Installment allocation.
//!
//! Splits the total of an installment purchase into per-month shares while
//! ensuring the shares sum exactly to the total (no cents lost or gained).
//!
//! Every installment but the last is the total divided by the count, rounded
//! half-up to cents. The last installment absorbs the rounding drift.

use financas_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::error::ConsolidationError;

/// Allocation utility for installment purchases.
pub struct InstallmentAllocator;

impl InstallmentAllocator {
    /// Amount due for installment `index` (zero-based) of a purchase.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use financas_core::consolidation::InstallmentAllocator;
    ///
    /// // 100 / 3 = [33.33, 33.33, 33.34]
    /// assert_eq!(InstallmentAllocator::allocate(dec!(100), 3, 0).unwrap(), dec!(33.33));
    /// assert_eq!(InstallmentAllocator::allocate(dec!(100), 3, 2).unwrap(), dec!(33.34));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if `installments` is zero or `index` is not in
    /// `0..installments`.
    pub fn allocate(
        total: Decimal,
        installments: u32,
        index: u32,
    ) -> Result<Decimal, ConsolidationError> {
        if installments < 1 {
            return Err(ConsolidationError::InvalidInstallmentCount(installments));
        }
        if index >= installments {
            return Err(ConsolidationError::InstallmentIndexOutOfRange {
                index,
                installments,
            });
        }

        let base = round_money(total / Decimal::from(installments));
        if index == installments - 1 {
            let residual = total - base * Decimal::from(installments - 1);
            return Ok(round_money(residual));
        }
        Ok(base)
    }

    /// Every installment of a purchase, in due order.
    ///
    /// # Errors
    ///
    /// Returns an error if `installments` is zero.
    pub fn schedule(total: Decimal, installments: u32) -> Result<Vec<Decimal>, ConsolidationError> {
        if installments < 1 {
            return Err(ConsolidationError::InvalidInstallmentCount(installments));
        }
        (0..installments)
            .map(|index| Self::allocate(total, installments, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_allocate_single_installment_is_total() {
        assert_eq!(
            InstallmentAllocator::allocate(dec!(120.50), 1, 0).unwrap(),
            dec!(120.50)
        );
        assert_eq!(
            InstallmentAllocator::allocate(dec!(0.01), 1, 0).unwrap(),
            dec!(0.01)
        );
    }

    #[test]
    fn test_allocate_even_split() {
        let result = InstallmentAllocator::schedule(dec!(240.00), 2).unwrap();
        assert_eq!(result, vec![dec!(120.00), dec!(120.00)]);
    }

    #[test]
    fn test_allocate_thirds_remainder_goes_last() {
        // 100 / 3 = 33.33... -> [33.33, 33.33, 33.34]
        let result = InstallmentAllocator::schedule(dec!(100.00), 3).unwrap();
        assert_eq!(result, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
    }

    #[test]
    fn test_allocate_rounds_base_up_and_last_down() {
        // 200 / 3 = 66.666... -> base 66.67, last 200 - 133.34 = 66.66
        let result = InstallmentAllocator::schedule(dec!(200.00), 3).unwrap();
        assert_eq!(result, vec![dec!(66.67), dec!(66.67), dec!(66.66)]);
    }

    #[test]
    fn test_allocate_zero_total() {
        let result = InstallmentAllocator::schedule(Decimal::ZERO, 4).unwrap();
        assert!(result.iter().all(Decimal::is_zero));
    }

    #[rstest]
    #[case(dec!(100), 3)]
    #[case(dec!(100), 7)]
    #[case(dec!(1000), 3)]
    #[case(dec!(1), 3)]
    #[case(dec!(0.01), 3)]
    #[case(dec!(999.99), 7)]
    #[case(dec!(10), 12)]
    fn test_allocate_sum_invariant(#[case] total: Decimal, #[case] installments: u32) {
        let result = InstallmentAllocator::schedule(total, installments).unwrap();
        assert_eq!(
            result.iter().sum::<Decimal>(),
            total,
            "Sum invariant failed for total={total}, installments={installments}"
        );
    }

    #[test]
    fn test_allocate_rejects_zero_installments() {
        assert!(matches!(
            InstallmentAllocator::allocate(dec!(10), 0, 0),
            Err(ConsolidationError::InvalidInstallmentCount(0))
        ));
        assert!(InstallmentAllocator::schedule(dec!(10), 0).is_err());
    }

    #[test]
    fn test_allocate_rejects_index_out_of_range() {
        assert!(matches!(
            InstallmentAllocator::allocate(dec!(10), 2, 2),
            Err(ConsolidationError::InstallmentIndexOutOfRange {
                index: 2,
                installments: 2
            })
        ));
    }
}
