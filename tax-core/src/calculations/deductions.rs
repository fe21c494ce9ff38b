//! Deductions and contribution limits that are a straight table lookup.

use rust_decimal::Decimal;

use crate::calculations::common::{max, round_whole_dollars};
use crate::models::{RetirementAccountType, RetirementLimits};

/// `miles × rate`, rounded to whole dollars.
pub fn mileage_amount(
    miles: Decimal,
    rate_per_mile: Decimal,
) -> Decimal {
    round_whole_dollars(miles * rate_per_mile)
}

/// AGI less the deduction, floored at zero.
pub fn taxable_income(
    adjusted_gross_income: Decimal,
    deduction: Decimal,
) -> Decimal {
    max(adjusted_gross_income - deduction, Decimal::ZERO)
}

/// Annual contribution limit for `account`, including catch-up once `age`
/// reaches the catch-up age.
pub fn contribution_limit(
    limits: &RetirementLimits,
    account: RetirementAccountType,
    age: Option<u32>,
) -> Decimal {
    let limit = limits.get(account);
    match age {
        Some(age) if age >= limits.catch_up_age => limit.base_limit + limit.catch_up,
        _ => limit.base_limit,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::rules::builtin;

    #[test]
    fn mileage_amount_multiplies_by_rate() {
        assert_eq!(mileage_amount(dec!(1000), dec!(0.70)), dec!(700));
    }

    #[test]
    fn mileage_amount_rounds_half_up() {
        // 1234.5 × 0.70 = 864.15
        assert_eq!(mileage_amount(dec!(1234.5), dec!(0.70)), dec!(864));
        // 25 × 0.14 = 3.50
        assert_eq!(mileage_amount(dec!(25), dec!(0.14)), dec!(4));
    }

    #[test]
    fn taxable_income_floors_at_zero() {
        assert_eq!(taxable_income(dec!(10000), dec!(15000)), dec!(0));
        assert_eq!(taxable_income(dec!(100000), dec!(15000)), dec!(85000));
    }

    #[test]
    fn contribution_limit_without_catch_up() {
        let limits = builtin::rules_2025().retirement_limits;

        assert_eq!(
            contribution_limit(&limits, RetirementAccountType::Employee401k, Some(49)),
            dec!(23500)
        );
        assert_eq!(
            contribution_limit(&limits, RetirementAccountType::Ira, None),
            dec!(7000)
        );
    }

    #[test]
    fn contribution_limit_with_catch_up_at_fifty() {
        let limits = builtin::rules_2025().retirement_limits;

        assert_eq!(
            contribution_limit(&limits, RetirementAccountType::Employee401k, Some(50)),
            dec!(31000)
        );
        assert_eq!(
            contribution_limit(&limits, RetirementAccountType::SimpleIra, Some(64)),
            dec!(20000)
        );
    }

    #[test]
    fn sep_ira_has_no_catch_up() {
        let limits = builtin::rules_2025().retirement_limits;

        assert_eq!(
            contribution_limit(&limits, RetirementAccountType::SepIra, Some(70)),
            dec!(70000)
        );
    }
}
