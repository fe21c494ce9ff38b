use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatus;

/// Facts about a taxpayer, as collected at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxpayerFacts {
    pub filing_status: FilingStatus,
    pub taxable_income: Decimal,
    #[serde(default)]
    pub number_of_qualifying_children: u32,
    pub adjusted_gross_income: Decimal,
    #[serde(default)]
    pub business_miles: Decimal,
    #[serde(default)]
    pub self_employment_income: Decimal,
    /// Age at year end; `None` means no catch-up contributions.
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTaxCredit {
    pub credit: Decimal,
    /// Portion of `credit` that is refundable. Never exceeds `credit`.
    pub refundable_credit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxComputationResult {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    /// Whole dollars.
    pub federal_tax: Decimal,
    pub child_tax_credit: ChildTaxCredit,
    pub mileage_deduction: Decimal,
    pub quarterly_estimated_payment: Decimal,
    /// Percentage of adjusted gross income.
    pub effective_rate: Decimal,
    /// Percentage applied to the next dollar of taxable income.
    pub marginal_rate: Decimal,
    pub standard_deduction: Decimal,
    /// Employee 401(k) limit including any catch-up the taxpayer's age allows.
    pub retirement_contribution_limit: Decimal,
}
