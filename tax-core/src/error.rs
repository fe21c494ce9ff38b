use thiserror::Error;

/// Errors raised by the rule table, the calculation engine and the pricing
/// engine.
///
/// None of these are recovered inside the crate; callers decide how to
/// recover.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// No rule table is registered for the requested tax year.
    #[error("no tax rules registered for tax year {0}")]
    UnsupportedTaxYear(i32),

    /// The filing status string is not one of the four recognized values.
    #[error("unsupported filing status '{0}'")]
    UnsupportedFilingStatus(String),

    /// A monetary amount, mileage, or count was out of range.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Pricing was requested for a service type the pricing table lacks.
    #[error("unknown service type '{0}'")]
    UnknownServiceType(String),

    /// A bracket schedule violates ordering, continuity, or rate bounds.
    #[error("invalid bracket schedule: {0}")]
    InvalidBracketSchedule(String),

    /// A tax year's rule set is internally inconsistent.
    #[error("invalid rules for tax year {tax_year}: {reason}")]
    InvalidRuleTable { tax_year: i32, reason: String },
}

impl TaxError {
    pub(crate) fn negative(
        field: &'static str,
        value: impl std::fmt::Display,
    ) -> Self {
        TaxError::InvalidInput {
            field,
            reason: format!("must not be negative, got {value}"),
        }
    }
}
