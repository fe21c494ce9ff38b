//! Rounding and comparison helpers shared by the calculations.
//!
//! Each operation picks its rounding mode explicitly: final tax, mileage and
//! quote totals round half-up to whole dollars, while phase-out steps and
//! quarterly payments round up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole dollars, half away from zero.
///
/// `Decimal::round` uses banker's rounding, which would turn 898.5 into 898.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_whole_dollars;
///
/// assert_eq!(round_whole_dollars(dec!(898.5)), dec!(899));
/// assert_eq!(round_whole_dollars(dec!(5914.49)), dec!(5914));
/// ```
pub fn round_whole_dollars(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds up to the next whole dollar.
pub fn ceil_whole_dollars(value: Decimal) -> Decimal {
    value.ceil()
}

/// Returns the larger of two values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole_dollars tests
    // =========================================================================

    #[test]
    fn round_whole_dollars_rounds_half_up_not_to_even() {
        assert_eq!(round_whole_dollars(dec!(898.5)), dec!(899));
        assert_eq!(round_whole_dollars(dec!(1192.5)), dec!(1193));
        assert_eq!(round_whole_dollars(dec!(2.5)), dec!(3));
    }

    #[test]
    fn round_whole_dollars_rounds_down_below_midpoint() {
        assert_eq!(round_whole_dollars(dec!(1330.49)), dec!(1330));
    }

    #[test]
    fn round_whole_dollars_keeps_whole_values() {
        assert_eq!(round_whole_dollars(dec!(5914.00)), dec!(5914));
    }

    // =========================================================================
    // ceil_whole_dollars tests
    // =========================================================================

    #[test]
    fn ceil_whole_dollars_rounds_any_fraction_up() {
        assert_eq!(ceil_whole_dollars(dec!(1330.01)), dec!(1331));
        assert_eq!(ceil_whole_dollars(dec!(1330.65)), dec!(1331));
    }

    #[test]
    fn ceil_whole_dollars_keeps_whole_values() {
        assert_eq!(ceil_whole_dollars(dec!(50)), dec!(50));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        assert_eq!(max(dec!(-50.00), dec!(50.00)), dec!(50.00));
    }
}
