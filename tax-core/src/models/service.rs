use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatus;
use crate::TaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    IndividualTaxReturn,
    BusinessTaxReturn,
    TaxPlanning,
    Bookkeeping,
    DebtResolution,
    Consultation,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        Self::IndividualTaxReturn,
        Self::BusinessTaxReturn,
        Self::TaxPlanning,
        Self::Bookkeeping,
        Self::DebtResolution,
        Self::Consultation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IndividualTaxReturn => "individual-tax-return",
            Self::BusinessTaxReturn => "business-tax-return",
            Self::TaxPlanning => "tax-planning",
            Self::Bookkeeping => "bookkeeping",
            Self::DebtResolution => "debt-resolution",
            Self::Consultation => "consultation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::IndividualTaxReturn => "Individual Tax Return",
            Self::BusinessTaxReturn => "Business Tax Return",
            Self::TaxPlanning => "Tax Planning",
            Self::Bookkeeping => "Bookkeeping",
            Self::DebtResolution => "Tax Debt Resolution",
            Self::Consultation => "Consultation",
        }
    }

    /// Free services are never charged, rush or not.
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Consultation)
    }

    /// Whether the tier is derived from intake answers rather than supplied.
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::IndividualTaxReturn | Self::BusinessTaxReturn)
    }
}

impl FromStr for ServiceType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TaxError::UnknownServiceType(s.to_string()))
    }
}

impl fmt::Display for ServiceType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl ComplexityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "moderate" => Some(Self::Moderate),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }

    /// Like [`ComplexityTier::parse`], but unrecognized tiers resolve to
    /// [`ComplexityTier::Simple`], which every pricing entry carries.
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(tier = s, "unrecognized complexity tier, using simple");
            Self::Simple
        })
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intake questionnaire answers used for complexity scoring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceIntakeDetails {
    pub has_self_employment: bool,
    pub has_rental_property: bool,
    pub has_investments: bool,
    pub estimated_income: Option<Decimal>,
    pub filing_status: Option<FilingStatus>,
    /// Free-form entity description, e.g. `"s-corp"` or `"c-corp"`. Matched
    /// as given; callers normalize case.
    pub business_type: Option<String>,
    pub urgent_service: bool,
    /// Caller-chosen tier for services that are not scored.
    pub complexity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceComplexityQuote {
    pub service_type: ServiceType,
    pub complexity_tier: ComplexityTier,
    pub base_amount: Decimal,
    pub rush_surcharge: Decimal,
    pub total_amount: Decimal,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn service_type_parses_kebab_names() {
        assert_eq!(
            "business-tax-return".parse::<ServiceType>(),
            Ok(ServiceType::BusinessTaxReturn)
        );
    }

    #[test]
    fn service_type_rejects_unknown() {
        assert_eq!(
            "payroll".parse::<ServiceType>(),
            Err(TaxError::UnknownServiceType("payroll".to_string()))
        );
    }

    #[test]
    fn service_type_matches_serde_name() {
        for service in ServiceType::ALL {
            let json = serde_json::to_string(&service).unwrap();
            assert_eq!(json, format!("\"{}\"", service.as_str()));
        }
    }

    #[test]
    fn tier_parse_lenient_defaults_to_simple() {
        assert_eq!(ComplexityTier::parse_lenient("Complex"), ComplexityTier::Complex);
        assert_eq!(ComplexityTier::parse_lenient("extreme"), ComplexityTier::Simple);
        assert_eq!(ComplexityTier::parse_lenient(""), ComplexityTier::Simple);
    }

    #[test]
    fn intake_details_deserialize_with_defaults() {
        let details: ServiceIntakeDetails =
            serde_json::from_str(r#"{"hasSelfEmployment": true, "estimatedIncome": "120000"}"#)
                .unwrap();

        assert!(details.has_self_employment);
        assert!(!details.has_rental_property);
        assert_eq!(details.estimated_income, Some(rust_decimal_macros::dec!(120000)));
        assert_eq!(details.filing_status, None);
    }
}
