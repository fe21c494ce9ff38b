//! Rule-table-backed tax calculations.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxCalculationEngine;
//! use tax_core::{FilingStatus, TaxRuleTable};
//!
//! let rules = TaxRuleTable::builtin();
//! let engine = TaxCalculationEngine::new(&rules);
//!
//! let tax = engine
//!     .federal_tax(dec!(50000), FilingStatus::Single, 2025)
//!     .unwrap();
//!
//! assert_eq!(tax, dec!(5914));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::round_whole_dollars;
use crate::calculations::{brackets, credits, deductions, estimated};
use crate::models::{
    ChildTaxCredit, FilingStatus, MileagePurpose, RetirementAccountType, TaxComputationResult,
    TaxpayerFacts,
};
use crate::rules::TaxRuleTable;
use crate::TaxError;

fn reject_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxError> {
    if value < Decimal::ZERO {
        return Err(TaxError::negative(field, value));
    }
    Ok(())
}

/// Calculator over a borrowed [`TaxRuleTable`].
///
/// Every operation is a pure function of its arguments and the table, so one
/// engine can be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculationEngine<'a> {
    rules: &'a TaxRuleTable,
}

impl<'a> TaxCalculationEngine<'a> {
    pub fn new(rules: &'a TaxRuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a TaxRuleTable {
        self.rules
    }

    /// Federal income tax on `taxable_income`, in whole dollars (half-up).
    ///
    /// Zero or negative income owes nothing and is not an error.
    ///
    /// # Errors
    /// [`TaxError::UnsupportedTaxYear`] when the year has no rules.
    pub fn federal_tax(
        &self,
        taxable_income: Decimal,
        filing_status: FilingStatus,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        let schedule = self.rules.get_bracket_schedule(tax_year, filing_status)?;
        let tax = round_whole_dollars(brackets::progressive_tax(schedule, taxable_income));
        debug!(%taxable_income, %filing_status, tax_year, %tax, "federal tax");
        Ok(tax)
    }

    /// Child tax credit after the AGI phase-out.
    ///
    /// # Errors
    /// [`TaxError::InvalidInput`] for negative AGI, or
    /// [`TaxError::UnsupportedTaxYear`].
    pub fn child_tax_credit(
        &self,
        number_of_qualifying_children: u32,
        adjusted_gross_income: Decimal,
        filing_status: FilingStatus,
        tax_year: i32,
    ) -> Result<ChildTaxCredit, TaxError> {
        let rules = self.rules.get_rules(tax_year)?;
        if number_of_qualifying_children == 0 {
            return Ok(ChildTaxCredit::default());
        }
        reject_negative("adjusted gross income", adjusted_gross_income)?;

        Ok(credits::child_tax_credit(
            &rules.child_tax_credit,
            number_of_qualifying_children,
            adjusted_gross_income,
            filing_status,
        ))
    }

    /// Business mileage deduction in whole dollars.
    pub fn mileage_deduction(
        &self,
        business_miles: Decimal,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        self.mileage_deduction_for(MileagePurpose::Business, business_miles, tax_year)
    }

    /// Mileage deduction at the standard rate for `purpose`.
    ///
    /// # Errors
    /// [`TaxError::InvalidInput`] for negative miles, or
    /// [`TaxError::UnsupportedTaxYear`].
    pub fn mileage_deduction_for(
        &self,
        purpose: MileagePurpose,
        miles: Decimal,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        let rules = self.rules.get_rules(tax_year)?;
        reject_negative("miles", miles)?;
        Ok(deductions::mileage_amount(
            miles,
            rules.mileage_rates.rate(purpose),
        ))
    }

    /// Quarterly estimated payment targeting 90% of this year's projected
    /// federal and self-employment tax, rounded up to whole dollars.
    ///
    /// # Errors
    /// [`TaxError::InvalidInput`] for negative self-employment income, or
    /// [`TaxError::UnsupportedTaxYear`].
    pub fn quarterly_estimated_tax(
        &self,
        annual_income: Decimal,
        filing_status: FilingStatus,
        tax_year: i32,
        self_employment_income: Decimal,
    ) -> Result<Decimal, TaxError> {
        reject_negative("self-employment income", self_employment_income)?;

        let federal_tax = self.federal_tax(annual_income, filing_status, tax_year)?;
        let se_tax = estimated::self_employment_tax(self_employment_income);
        let payment = estimated::quarterly_payment(federal_tax + se_tax);

        debug!(%federal_tax, %se_tax, %payment, "quarterly estimated payment");
        Ok(payment)
    }

    /// `total_tax / total_income × 100`, or zero when there is no income.
    ///
    /// Exact decimal division; callers round for display.
    ///
    /// # Errors
    /// [`TaxError::InvalidInput`] when the percentage does not fit in a
    /// `Decimal`, e.g. a huge tax over a fraction of a cent of income.
    pub fn effective_tax_rate(
        total_tax: Decimal,
        total_income: Decimal,
    ) -> Result<Decimal, TaxError> {
        if total_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        total_tax
            .checked_div(total_income)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| TaxError::InvalidInput {
                field: "effective rate",
                reason: format!("{total_tax} over {total_income} is out of range"),
            })
    }

    /// Rate (as a percentage) applied to the next dollar above `income`.
    pub fn marginal_tax_rate(
        &self,
        income: Decimal,
        filing_status: FilingStatus,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        let schedule = self.rules.get_bracket_schedule(tax_year, filing_status)?;
        Ok(brackets::marginal_bracket(schedule, income).tax_rate * dec!(100))
    }

    pub fn standard_deduction(
        &self,
        filing_status: FilingStatus,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        let rules = self.rules.get_rules(tax_year)?;
        Ok(*rules.standard_deduction.get(filing_status))
    }

    /// AGI less the standard deduction, floored at zero.
    pub fn taxable_income(
        &self,
        adjusted_gross_income: Decimal,
        filing_status: FilingStatus,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        let deduction = self.standard_deduction(filing_status, tax_year)?;
        Ok(deductions::taxable_income(adjusted_gross_income, deduction))
    }

    pub fn retirement_contribution_limit(
        &self,
        account: RetirementAccountType,
        age: Option<u32>,
        tax_year: i32,
    ) -> Result<Decimal, TaxError> {
        let rules = self.rules.get_rules(tax_year)?;
        Ok(deductions::contribution_limit(
            &rules.retirement_limits,
            account,
            age,
        ))
    }

    /// Runs every calculation for one taxpayer.
    ///
    /// The effective rate is measured against adjusted gross income and the
    /// marginal rate against taxable income.
    ///
    /// # Errors
    /// [`TaxError::InvalidInput`] for negative income, mileage or
    /// self-employment income or an effective rate out of `Decimal` range,
    /// or [`TaxError::UnsupportedTaxYear`].
    pub fn compute(
        &self,
        tax_year: i32,
        facts: &TaxpayerFacts,
    ) -> Result<TaxComputationResult, TaxError> {
        reject_negative("taxable income", facts.taxable_income)?;
        reject_negative("adjusted gross income", facts.adjusted_gross_income)?;

        let status = facts.filing_status;
        let federal_tax = self.federal_tax(facts.taxable_income, status, tax_year)?;
        let child_tax_credit = self.child_tax_credit(
            facts.number_of_qualifying_children,
            facts.adjusted_gross_income,
            status,
            tax_year,
        )?;
        let mileage_deduction = self.mileage_deduction(facts.business_miles, tax_year)?;
        let quarterly_estimated_payment = self.quarterly_estimated_tax(
            facts.taxable_income,
            status,
            tax_year,
            facts.self_employment_income,
        )?;
        let effective_rate = Self::effective_tax_rate(federal_tax, facts.adjusted_gross_income)?;
        let marginal_rate = self.marginal_tax_rate(facts.taxable_income, status, tax_year)?;
        let standard_deduction = self.standard_deduction(status, tax_year)?;
        let retirement_contribution_limit = self.retirement_contribution_limit(
            RetirementAccountType::Employee401k,
            facts.age,
            tax_year,
        )?;

        Ok(TaxComputationResult {
            tax_year,
            filing_status: status,
            federal_tax,
            child_tax_credit,
            mileage_deduction,
            quarterly_estimated_payment,
            effective_rate,
            marginal_rate,
            standard_deduction,
            retirement_contribution_limit,
        })
    }
}
