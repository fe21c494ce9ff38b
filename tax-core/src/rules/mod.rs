//! Year-keyed registry of tax rule sets.
//!
//! A [`TaxRuleTable`] is filled once at startup, either from the compiled-in
//! sets in [`builtin`] or from data files, and then only read. Engines borrow
//! it, so tests can hand them a fixture table instead.

pub mod builtin;

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{FilingStatus, TaxBracketSchedule, TaxYearRules};
use crate::TaxError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxRuleTable {
    years: BTreeMap<i32, TaxYearRules>,
}

impl TaxRuleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding every compiled-in rule set.
    pub fn builtin() -> Self {
        let mut years = BTreeMap::new();
        for rules in [builtin::rules_2024(), builtin::rules_2025()] {
            years.insert(rules.tax_year, rules);
        }
        Self { years }
    }

    /// Register the rules for one year, replacing any earlier registration.
    ///
    /// # Errors
    /// [`TaxError::InvalidRuleTable`] when the rule set fails
    /// [`TaxYearRules::validate`].
    pub fn register(
        &mut self,
        rules: TaxYearRules,
    ) -> Result<(), TaxError> {
        rules.validate()?;
        debug!(tax_year = rules.tax_year, "registered tax rules");
        self.years.insert(rules.tax_year, rules);
        Ok(())
    }

    /// Rules for `tax_year`. There is no fallback to a neighbouring year.
    pub fn get_rules(
        &self,
        tax_year: i32,
    ) -> Result<&TaxYearRules, TaxError> {
        self.years
            .get(&tax_year)
            .ok_or(TaxError::UnsupportedTaxYear(tax_year))
    }

    pub fn get_bracket_schedule(
        &self,
        tax_year: i32,
        filing_status: FilingStatus,
    ) -> Result<&TaxBracketSchedule, TaxError> {
        Ok(self.get_rules(tax_year)?.brackets.get(filing_status))
    }

    /// String-keyed lookup for callers that have not parsed the status yet.
    pub fn get_bracket_schedule_for_code(
        &self,
        tax_year: i32,
        filing_status: &str,
    ) -> Result<&TaxBracketSchedule, TaxError> {
        let status: FilingStatus = filing_status.parse()?;
        self.get_bracket_schedule(tax_year, status)
    }

    /// Registered years in ascending order.
    pub fn supported_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
