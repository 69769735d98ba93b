//! Amount quantization and the income/expense sign convention.

use super::transaction::TransactionKind;

/// Every stored amount is a multiple of this many minor units.
pub const AMOUNT_STEP: i64 = 100;

/// Largest magnitude accepted from user input or import candidates.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Lowest multiple of [`AMOUNT_STEP`] an `i64` can hold.
const MIN_NORMALIZED: i64 = i64::MIN + 8;

/// Floors a signed amount to the next lower multiple of [`AMOUNT_STEP`].
///
/// The floor is taken on the signed value, so expenses grow in magnitude:
/// `normalize(-250) == -300` while `normalize(250) == 200`. The handful of
/// values below [`MIN_NORMALIZED`] clamp to it instead of overflowing.
pub fn normalize(amount: i64) -> i64 {
    checked_normalize(amount).unwrap_or(MIN_NORMALIZED)
}

/// `None` when the floored value is not representable.
pub fn checked_normalize(amount: i64) -> Option<i64> {
    amount.div_euclid(AMOUNT_STEP).checked_mul(AMOUNT_STEP)
}

/// Builds the signed, not yet normalized amount for a user-entered magnitude.
pub fn signed_amount(magnitude: i64, kind: TransactionKind) -> i64 {
    match kind {
        TransactionKind::Income => magnitude.saturating_abs(),
        TransactionKind::Expense => -magnitude.saturating_abs(),
    }
}

/// Whether a magnitude is within the accepted input range.
pub fn within_limit(amount: i64) -> bool {
    amount.unsigned_abs() <= MAX_AMOUNT as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_toward_negative_infinity() {
        assert_eq!(normalize(-250), -300);
        assert_eq!(normalize(250), 200);
        assert_eq!(normalize(0), 0);
        assert_eq!(normalize(-100), -100);
        assert_eq!(normalize(-1), -100);
        assert_eq!(normalize(99), 0);
    }

    #[test]
    fn normalized_values_stay_within_one_step() {
        for amount in (-1_050..=1_050).step_by(7) {
            let rounded = normalize(amount);
            assert!(rounded <= amount, "{rounded} > {amount}");
            assert!(amount - rounded < AMOUNT_STEP);
            assert_eq!(rounded % AMOUNT_STEP, 0);
        }
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(checked_normalize(i64::MIN), None);
        assert_eq!(normalize(i64::MIN), -9_223_372_036_854_775_800);
        assert_eq!(normalize(i64::MIN) % AMOUNT_STEP, 0);
        assert_eq!(normalize(i64::MAX), 9_223_372_036_854_775_800);
        assert_eq!(signed_amount(i64::MIN, TransactionKind::Expense), -i64::MAX);
        assert!(within_limit(-MAX_AMOUNT));
        assert!(!within_limit(i64::MAX));
        assert!(!within_limit(i64::MIN));
    }

    #[test]
    fn sign_follows_kind() {
        assert_eq!(signed_amount(500, TransactionKind::Income), 500);
        assert_eq!(signed_amount(500, TransactionKind::Expense), -500);
        assert_eq!(signed_amount(-500, TransactionKind::Income), 500);
    }
}
