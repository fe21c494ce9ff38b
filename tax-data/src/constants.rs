use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{ByFilingStatus, ChildTaxCreditRules, MileageRates, RetirementLimits};

use crate::RulesLoaderError;

/// Non-bracket constants for one tax year, read from a `tax_year_<year>.toml`
/// file.
///
/// ```toml
/// tax_year = 2025
///
/// [standard_deduction]
/// single = "15000"
/// married_filing_jointly = "30000"
/// married_filing_separately = "15000"
/// head_of_household = "22500"
///
/// [child_tax_credit]
/// per_child_amount = "2000"
/// # ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearConstants {
    pub tax_year: i32,
    pub standard_deduction: ByFilingStatus<Decimal>,
    pub child_tax_credit: ChildTaxCreditRules,
    pub retirement_limits: RetirementLimits,
    pub mileage_rates: MileageRates,
}

impl YearConstants {
    pub fn parse(
        file: &str,
        contents: &str,
    ) -> Result<Self, RulesLoaderError> {
        toml::from_str(contents).map_err(|e| RulesLoaderError::toml(file, e))
    }

    pub fn from_path(path: &Path) -> Result<Self, RulesLoaderError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| RulesLoaderError::io(path, e))?;
        Self::parse(&path.display().to_string(), &contents)
    }
}
