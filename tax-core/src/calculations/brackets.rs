//! Progressive bracket arithmetic over a single [`TaxBracketSchedule`].
//!
//! These functions work on exact decimals and do not round; the engine
//! applies the per-operation rounding.

use rust_decimal::Decimal;

use crate::models::{TaxBracket, TaxBracketSchedule};

/// Tax owed on `taxable_income` under `schedule`, before rounding.
///
/// Walks the brackets in ascending order and taxes
/// `min(remaining, width)` of the income at each bracket's rate. The top
/// bracket is unbounded and absorbs whatever is left. Zero or negative
/// income owes nothing.
pub fn progressive_tax(
    schedule: &TaxBracketSchedule,
    taxable_income: Decimal,
) -> Decimal {
    let mut remaining = taxable_income;
    let mut tax = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxed = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        tax += taxed * bracket.tax_rate;
        remaining -= taxed;
    }

    tax
}

/// Bracket that taxes the next dollar earned above `income`.
///
/// This is the first bracket whose upper bound is unbounded or above
/// `income`, so income sitting exactly on a threshold belongs to the
/// bracket that starts there.
pub fn marginal_bracket(
    schedule: &TaxBracketSchedule,
    income: Decimal,
) -> &TaxBracket {
    let brackets = schedule.brackets();
    brackets
        .iter()
        .find(|b| b.max_income.is_none_or(|max| max > income))
        .unwrap_or(&brackets[brackets.len() - 1])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FilingStatus;
    use crate::rules::builtin;

    fn single_2025() -> TaxBracketSchedule {
        builtin::rules_2025()
            .brackets
            .get(FilingStatus::Single)
            .clone()
    }

    // =========================================================================
    // progressive_tax tests
    // =========================================================================

    #[test]
    fn zero_income_owes_nothing() {
        assert_eq!(progressive_tax(&single_2025(), dec!(0)), dec!(0));
    }

    #[test]
    fn negative_income_owes_nothing() {
        assert_eq!(progressive_tax(&single_2025(), dec!(-5000)), dec!(0));
    }

    #[test]
    fn first_bracket_only() {
        assert_eq!(progressive_tax(&single_2025(), dec!(10000)), dec!(1000.00));
    }

    #[test]
    fn spans_three_brackets() {
        // 11925 × 10% + 36550 × 12% + 1525 × 22% = 1192.50 + 4386 + 335.50
        assert_eq!(progressive_tax(&single_2025(), dec!(50000)), dec!(5914.00));
    }

    #[test]
    fn top_bracket_is_unbounded() {
        // 188769.75 cumulative at 626350, then 37% on 73650
        assert_eq!(
            progressive_tax(&single_2025(), dec!(700000)),
            dec!(216020.25)
        );
    }

    #[test]
    fn exact_threshold_uses_lower_bracket_only() {
        assert_eq!(progressive_tax(&single_2025(), dec!(11925)), dec!(1192.50));
    }

    #[test]
    fn tax_is_non_decreasing_in_income() {
        let schedule = single_2025();
        let mut previous = Decimal::ZERO;

        for step in 0..=800 {
            let income = Decimal::from(step * 1_000);
            let tax = progressive_tax(&schedule, income);
            assert!(tax >= previous, "tax fell at income {income}");
            previous = tax;
        }
    }

    #[test]
    fn doubling_income_never_decreases_tax() {
        let schedule = single_2025();

        for income in [dec!(1), dec!(11925), dec!(60000), dec!(250000), dec!(900000)] {
            assert!(
                progressive_tax(&schedule, income * dec!(2))
                    >= progressive_tax(&schedule, income)
            );
        }
    }

    #[test]
    fn no_jump_at_bracket_boundaries() {
        let rules = builtin::rules_2025();
        let cent = dec!(0.01);

        for (_, schedule) in rules.brackets.iter() {
            for bracket in schedule.brackets() {
                let Some(boundary) = bracket.max_income else {
                    continue;
                };
                let below = progressive_tax(schedule, boundary - cent);
                let at = progressive_tax(schedule, boundary);

                assert!(below < at);
                assert_eq!(at - below, cent * bracket.tax_rate);
            }
        }
    }

    // =========================================================================
    // marginal_bracket tests
    // =========================================================================

    #[test]
    fn marginal_bracket_for_mid_bracket_income() {
        let schedule = single_2025();

        assert_eq!(marginal_bracket(&schedule, dec!(50000)).tax_rate, dec!(0.22));
    }

    #[test]
    fn marginal_bracket_at_threshold_is_next_bracket() {
        let schedule = single_2025();

        assert_eq!(marginal_bracket(&schedule, dec!(11925)).tax_rate, dec!(0.12));
        assert_eq!(marginal_bracket(&schedule, dec!(11924.99)).tax_rate, dec!(0.10));
    }

    #[test]
    fn marginal_bracket_for_zero_and_negative_income() {
        let schedule = single_2025();

        assert_eq!(marginal_bracket(&schedule, dec!(0)).tax_rate, dec!(0.10));
        assert_eq!(marginal_bracket(&schedule, dec!(-100)).tax_rate, dec!(0.10));
    }

    #[test]
    fn marginal_bracket_for_very_high_income() {
        let schedule = single_2025();

        assert_eq!(
            marginal_bracket(&schedule, dec!(10000000)).tax_rate,
            dec!(0.37)
        );
    }
}
