//! Self-employment tax and quarterly estimated payments.
//!
//! Only the current-year safe harbor is modelled: payments target 90% of
//! this year's projected tax. The prior-year (100%/110%) alternative needs a
//! prior-year liability the engine does not take as input.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::ceil_whole_dollars;

/// Combined Social Security (12.4%) and Medicare (2.9%) rate.
pub const SELF_EMPLOYMENT_TAX_RATE: Decimal = dec!(0.153);

/// Share of current-year tax that must be prepaid.
pub const CURRENT_YEAR_SAFE_HARBOR: Decimal = dec!(0.90);

pub const QUARTERS_PER_YEAR: Decimal = dec!(4);

pub fn self_employment_tax(self_employment_income: Decimal) -> Decimal {
    self_employment_income * SELF_EMPLOYMENT_TAX_RATE
}

/// One quarter of the safe-harbor amount, rounded up to whole dollars.
pub fn quarterly_payment(total_annual_tax: Decimal) -> Decimal {
    ceil_whole_dollars(total_annual_tax * CURRENT_YEAR_SAFE_HARBOR / QUARTERS_PER_YEAR)
}
