mod filing_status;
mod service;
mod tax_bracket;
mod tax_year_rules;
mod taxpayer;

pub use filing_status::FilingStatus;
pub use service::{ComplexityTier, ServiceComplexityQuote, ServiceIntakeDetails, ServiceType};
pub use tax_bracket::{TaxBracket, TaxBracketSchedule};
pub use tax_year_rules::{
    ByFilingStatus, ChildTaxCreditRules, ContributionLimit, MileagePurpose, MileageRates,
    RetirementAccountType, RetirementLimits, TaxYearRules,
};
pub use taxpayer::{ChildTaxCredit, TaxComputationResult, TaxpayerFacts};
