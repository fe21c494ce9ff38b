//! Intake complexity scoring.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ComplexityTier, FilingStatus, ServiceIntakeDetails};

const HIGH_INCOME: Decimal = dec!(100000);
const LARGE_BUSINESS_INCOME: Decimal = dec!(500000);

/// Points-based tier for an individual return.
///
/// | Answer                         | Points |
/// |--------------------------------|--------|
/// | self-employment income         | 2      |
/// | rental property                | 2      |
/// | investments                    | 1      |
/// | estimated income over 100,000  | 1      |
/// | married filing separately      | 1      |
///
/// Four or more points is complex, two or more moderate.
pub fn individual_return_score(details: &ServiceIntakeDetails) -> u32 {
    let mut score = 0;
    if details.has_self_employment {
        score += 2;
    }
    if details.has_rental_property {
        score += 2;
    }
    if details.has_investments {
        score += 1;
    }
    if details.estimated_income.is_some_and(|income| income > HIGH_INCOME) {
        score += 1;
    }
    if details.filing_status == Some(FilingStatus::MarriedFilingSeparately) {
        score += 1;
    }
    score
}

pub fn individual_return_tier(details: &ServiceIntakeDetails) -> ComplexityTier {
    match individual_return_score(details) {
        4.. => ComplexityTier::Complex,
        2.. => ComplexityTier::Moderate,
        _ => ComplexityTier::Simple,
    }
}

/// Tier for a business return, from entity type and income.
///
/// `business_type` is matched as given, so `"C-Corp"` does not count as a
/// C corporation.
pub fn business_return_tier(details: &ServiceIntakeDetails) -> ComplexityTier {
    let business_type = details.business_type.as_deref().unwrap_or_default();
    let income = details.estimated_income.unwrap_or_default();

    if business_type.contains("c-corp") || income > LARGE_BUSINESS_INCOME {
        ComplexityTier::Complex
    } else if business_type.contains("corp")
        || business_type.contains("partnership")
        || income > HIGH_INCOME
    {
        ComplexityTier::Moderate
    } else {
        ComplexityTier::Simple
    }
}
