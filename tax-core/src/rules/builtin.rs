//! Rule sets compiled into the binary.
//!
//! Figures follow the IRS inflation adjustments for each year (Rev. Proc.
//! 2023-34 for 2024, Rev. Proc. 2024-40 for 2025) and the standard mileage
//! rate notices.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    ByFilingStatus, ChildTaxCreditRules, ContributionLimit, MileageRates, RetirementLimits,
    TaxBracket, TaxBracketSchedule, TaxYearRules,
};

/// Federal marginal rates shared by every schedule since 2018.
const FEDERAL_RATES: [Decimal; 7] = [
    dec!(0.10),
    dec!(0.12),
    dec!(0.22),
    dec!(0.24),
    dec!(0.32),
    dec!(0.35),
    dec!(0.37),
];

/// Builds a seven-bracket schedule from the six upper thresholds.
fn schedule(thresholds: [Decimal; 6]) -> TaxBracketSchedule {
    let mut brackets = Vec::with_capacity(FEDERAL_RATES.len());
    let mut lower = Decimal::ZERO;

    for (index, rate) in FEDERAL_RATES.into_iter().enumerate() {
        let upper = thresholds.get(index).copied();
        brackets.push(TaxBracket::new(lower, upper, rate));
        if let Some(upper) = upper {
            lower = upper;
        }
    }

    TaxBracketSchedule::from_static(brackets)
}

fn child_tax_credit() -> ChildTaxCreditRules {
    ChildTaxCreditRules {
        per_child_amount: dec!(2000),
        per_child_refundable_amount: dec!(1700),
        phase_out_threshold: ByFilingStatus {
            single: dec!(200000),
            married_filing_jointly: dec!(400000),
            married_filing_separately: dec!(200000),
            head_of_household: dec!(200000),
        },
        phase_out_step: dec!(1000),
        phase_out_reduction: dec!(50),
    }
}

pub fn rules_2025() -> TaxYearRules {
    TaxYearRules {
        tax_year: 2025,
        standard_deduction: ByFilingStatus {
            single: dec!(15000),
            married_filing_jointly: dec!(30000),
            married_filing_separately: dec!(15000),
            head_of_household: dec!(22500),
        },
        brackets: ByFilingStatus {
            single: schedule([
                dec!(11925),
                dec!(48475),
                dec!(103350),
                dec!(197300),
                dec!(250525),
                dec!(626350),
            ]),
            married_filing_jointly: schedule([
                dec!(23850),
                dec!(96950),
                dec!(206700),
                dec!(394600),
                dec!(501050),
                dec!(751600),
            ]),
            married_filing_separately: schedule([
                dec!(11925),
                dec!(48475),
                dec!(103350),
                dec!(197300),
                dec!(250525),
                dec!(375800),
            ]),
            head_of_household: schedule([
                dec!(17000),
                dec!(64850),
                dec!(103350),
                dec!(197300),
                dec!(250500),
                dec!(626350),
            ]),
        },
        child_tax_credit: child_tax_credit(),
        retirement_limits: RetirementLimits {
            catch_up_age: 50,
            employee_401k: ContributionLimit {
                base_limit: dec!(23500),
                catch_up: dec!(7500),
            },
            ira: ContributionLimit {
                base_limit: dec!(7000),
                catch_up: dec!(1000),
            },
            simple_ira: ContributionLimit {
                base_limit: dec!(16500),
                catch_up: dec!(3500),
            },
            sep_ira: ContributionLimit {
                base_limit: dec!(70000),
                catch_up: Decimal::ZERO,
            },
        },
        mileage_rates: MileageRates {
            business: dec!(0.70),
            medical: dec!(0.21),
            charitable: dec!(0.14),
        },
    }
}

pub fn rules_2024() -> TaxYearRules {
    TaxYearRules {
        tax_year: 2024,
        standard_deduction: ByFilingStatus {
            single: dec!(14600),
            married_filing_jointly: dec!(29200),
            married_filing_separately: dec!(14600),
            head_of_household: dec!(21900),
        },
        brackets: ByFilingStatus {
            single: schedule([
                dec!(11600),
                dec!(47150),
                dec!(100525),
                dec!(191950),
                dec!(243725),
                dec!(609350),
            ]),
            married_filing_jointly: schedule([
                dec!(23200),
                dec!(94300),
                dec!(201050),
                dec!(383900),
                dec!(487450),
                dec!(731200),
            ]),
            married_filing_separately: schedule([
                dec!(11600),
                dec!(47150),
                dec!(100525),
                dec!(191950),
                dec!(243725),
                dec!(365600),
            ]),
            head_of_household: schedule([
                dec!(16550),
                dec!(63100),
                dec!(100500),
                dec!(191950),
                dec!(243700),
                dec!(609350),
            ]),
        },
        child_tax_credit: child_tax_credit(),
        retirement_limits: RetirementLimits {
            catch_up_age: 50,
            employee_401k: ContributionLimit {
                base_limit: dec!(23000),
                catch_up: dec!(7500),
            },
            ira: ContributionLimit {
                base_limit: dec!(7000),
                catch_up: dec!(1000),
            },
            simple_ira: ContributionLimit {
                base_limit: dec!(16000),
                catch_up: dec!(3500),
            },
            sep_ira: ContributionLimit {
                base_limit: dec!(69000),
                catch_up: Decimal::ZERO,
            },
        },
        mileage_rates: MileageRates {
            business: dec!(0.67),
            medical: dec!(0.21),
            charitable: dec!(0.14),
        },
    }
}
