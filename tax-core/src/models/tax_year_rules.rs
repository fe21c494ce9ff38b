use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FilingStatus, TaxBracketSchedule};
use crate::TaxError;

/// One value per filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
    pub head_of_household: T,
}

impl<T> ByFilingStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChildTaxCreditRules {
    pub per_child_amount: Decimal,
    /// Refundable (additional child tax credit) cap per child.
    pub per_child_refundable_amount: Decimal,
    /// AGI above which the credit starts to phase out.
    pub phase_out_threshold: ByFilingStatus<Decimal>,
    /// Income step; every step or fraction of one over the threshold
    /// reduces the credit by `phase_out_reduction`.
    pub phase_out_step: Decimal,
    pub phase_out_reduction: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetirementAccountType {
    Employee401k,
    Ira,
    SimpleIra,
    SepIra,
}

impl RetirementAccountType {
    pub const ALL: [RetirementAccountType; 4] = [
        Self::Employee401k,
        Self::Ira,
        Self::SimpleIra,
        Self::SepIra,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "401k" | "employee401k" | "employee-401k" => Some(Self::Employee401k),
            "ira" => Some(Self::Ira),
            "simple" | "simpleira" | "simple-ira" => Some(Self::SimpleIra),
            "sep" | "sepira" | "sep-ira" => Some(Self::SepIra),
            _ => None,
        }
    }
}

impl fmt::Display for RetirementAccountType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            Self::Employee401k => "401(k)",
            Self::Ira => "IRA",
            Self::SimpleIra => "SIMPLE IRA",
            Self::SepIra => "SEP IRA",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContributionLimit {
    pub base_limit: Decimal,
    /// Additional amount allowed once the saver reaches the catch-up age.
    #[serde(default)]
    pub catch_up: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetirementLimits {
    pub catch_up_age: u32,
    pub employee_401k: ContributionLimit,
    pub ira: ContributionLimit,
    pub simple_ira: ContributionLimit,
    pub sep_ira: ContributionLimit,
}

impl RetirementLimits {
    pub fn get(
        &self,
        account: RetirementAccountType,
    ) -> &ContributionLimit {
        match account {
            RetirementAccountType::Employee401k => &self.employee_401k,
            RetirementAccountType::Ira => &self.ira,
            RetirementAccountType::SimpleIra => &self.simple_ira,
            RetirementAccountType::SepIra => &self.sep_ira,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MileagePurpose {
    Business,
    Medical,
    Charitable,
}

impl MileagePurpose {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Some(Self::Business),
            "medical" | "moving" => Some(Self::Medical),
            "charitable" | "charity" => Some(Self::Charitable),
            _ => None,
        }
    }
}

/// Standard mileage rates in dollars per mile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MileageRates {
    pub business: Decimal,
    pub medical: Decimal,
    pub charitable: Decimal,
}

impl MileageRates {
    pub fn rate(
        &self,
        purpose: MileagePurpose,
    ) -> Decimal {
        match purpose {
            MileagePurpose::Business => self.business,
            MileagePurpose::Medical => self.medical,
            MileagePurpose::Charitable => self.charitable,
        }
    }
}

/// Every constant the engine needs for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearRules {
    pub tax_year: i32,
    pub standard_deduction: ByFilingStatus<Decimal>,
    pub brackets: ByFilingStatus<TaxBracketSchedule>,
    pub child_tax_credit: ChildTaxCreditRules,
    pub retirement_limits: RetirementLimits,
    pub mileage_rates: MileageRates,
}

impl TaxYearRules {
    /// Checks the constants that bracket schedules do not validate themselves.
    pub fn validate(&self) -> Result<(), TaxError> {
        let invalid = |reason: String| {
            Err(TaxError::InvalidRuleTable {
                tax_year: self.tax_year,
                reason,
            })
        };

        for (status, amount) in self.standard_deduction.iter() {
            if *amount < Decimal::ZERO {
                return invalid(format!("standard deduction for {status} is negative"));
            }
        }

        let ctc = &self.child_tax_credit;
        if ctc.per_child_amount < Decimal::ZERO || ctc.per_child_refundable_amount < Decimal::ZERO
        {
            return invalid("child tax credit amounts must not be negative".to_string());
        }
        if ctc.per_child_refundable_amount > ctc.per_child_amount {
            return invalid(format!(
                "refundable child credit {} exceeds the per-child amount {}",
                ctc.per_child_refundable_amount, ctc.per_child_amount
            ));
        }
        if ctc.phase_out_step <= Decimal::ZERO {
            return invalid("child credit phase-out step must be positive".to_string());
        }
        if ctc.phase_out_reduction < Decimal::ZERO {
            return invalid("child credit phase-out reduction must not be negative".to_string());
        }
        for (status, threshold) in ctc.phase_out_threshold.iter() {
            if *threshold < Decimal::ZERO {
                return invalid(format!("phase-out threshold for {status} is negative"));
            }
        }

        for account in RetirementAccountType::ALL {
            let limit = self.retirement_limits.get(account);
            if limit.base_limit < Decimal::ZERO || limit.catch_up < Decimal::ZERO {
                return invalid(format!("{account} contribution limits must not be negative"));
            }
        }

        let rates = &self.mileage_rates;
        if rates.business < Decimal::ZERO
            || rates.medical < Decimal::ZERO
            || rates.charitable < Decimal::ZERO
        {
            return invalid("mileage rates must not be negative".to_string());
        }

        Ok(())
    }
}
