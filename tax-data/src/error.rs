use std::path::PathBuf;

use tax_core::TaxError;
use thiserror::Error;

/// Errors that can occur when loading rule or pricing files.
#[derive(Debug, Error)]
pub enum RulesLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error in {file}: {message}")]
    TomlParse { file: String, message: String },

    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Tax year {tax_year} has no brackets for schedule {schedule}")]
    MissingSchedule {
        tax_year: i32,
        schedule: &'static str,
    },

    #[error(
        "Tax year {tax_year} schedule {schedule}: base tax {stated} at {min_income} \
         does not match the computed {computed}"
    )]
    InconsistentBaseTax {
        tax_year: i32,
        schedule: String,
        min_income: rust_decimal::Decimal,
        stated: rust_decimal::Decimal,
        computed: rust_decimal::Decimal,
    },

    #[error("Tax year {0} is defined more than once")]
    DuplicateTaxYear(i32),

    #[error("No tax year constants found in {}", .0.display())]
    NoTaxYears(PathBuf),

    #[error("Invalid rules: {0}")]
    Rules(#[from] TaxError),
}

impl From<csv::Error> for RulesLoaderError {
    fn from(err: csv::Error) -> Self {
        RulesLoaderError::CsvParse(err.to_string())
    }
}

impl RulesLoaderError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        RulesLoaderError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn toml(
        file: impl Into<String>,
        err: toml::de::Error,
    ) -> Self {
        RulesLoaderError::TomlParse {
            file: file.into(),
            message: err.message().to_string(),
        }
    }
}
