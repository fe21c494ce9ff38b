use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use tax_core::{TaxRuleTable, TaxYearRules};
use tracing::{debug, info, warn};

use crate::brackets::{TaxBracketLoader, TaxBracketRecord, YearSchedules};
use crate::constants::YearConstants;
use crate::RulesLoaderError;

pub const BRACKETS_FILE: &str = "tax_brackets.csv";
pub const CONSTANTS_PREFIX: &str = "tax_year_";

/// Builds a [`TaxRuleTable`] from a rules directory.
///
/// The directory holds a single `tax_brackets.csv` with every year's
/// schedules and one `tax_year_<year>.toml` per year with the remaining
/// constants. A year is registered only when it has both; bracket rows for
/// a year without a constants file are skipped with a warning.
pub struct RulesLoader;

impl RulesLoader {
    pub fn load_dir(dir: &Path) -> Result<TaxRuleTable, RulesLoaderError> {
        let brackets_path = dir.join(BRACKETS_FILE);
        let file =
            File::open(&brackets_path).map_err(|e| RulesLoaderError::io(&brackets_path, e))?;
        let records = TaxBracketLoader::parse(file)?;
        debug!(path = %brackets_path.display(), records = records.len(), "parsed bracket CSV");

        let mut constants = Vec::new();
        for path in Self::constants_files(dir)? {
            constants.push(YearConstants::from_path(&path)?);
        }
        if constants.is_empty() {
            return Err(RulesLoaderError::NoTaxYears(dir.to_path_buf()));
        }

        let table = Self::build(&records, constants)?;
        info!(
            dir = %dir.display(),
            years = ?table.supported_years(),
            "loaded tax rules"
        );
        Ok(table)
    }

    /// Joins bracket rows with per-year constants and registers each year.
    ///
    /// # Errors
    ///
    /// * [`RulesLoaderError::DuplicateTaxYear`] when two constant sets name
    ///   the same year.
    /// * [`RulesLoaderError::MissingSchedule`] when a constants year has no
    ///   bracket rows for one of the schedules.
    /// * [`RulesLoaderError::Rules`] when a year fails validation.
    pub fn build(
        records: &[TaxBracketRecord],
        constants: Vec<YearConstants>,
    ) -> Result<TaxRuleTable, RulesLoaderError> {
        let mut by_year: BTreeMap<i32, YearConstants> = BTreeMap::new();
        for year in constants {
            let tax_year = year.tax_year;
            if by_year.insert(tax_year, year).is_some() {
                return Err(RulesLoaderError::DuplicateTaxYear(tax_year));
            }
        }

        let mut schedules: BTreeMap<i32, YearSchedules> = TaxBracketLoader::build(records)?;
        for tax_year in schedules.keys() {
            if !by_year.contains_key(tax_year) {
                warn!(tax_year, "bracket rows have no constants file; skipping year");
            }
        }

        let mut table = TaxRuleTable::new();
        for (tax_year, year) in by_year {
            let brackets = schedules
                .remove(&tax_year)
                .ok_or(RulesLoaderError::MissingSchedule {
                    tax_year,
                    schedule: "X",
                })?;
            table.register(TaxYearRules {
                tax_year,
                standard_deduction: year.standard_deduction,
                brackets,
                child_tax_credit: year.child_tax_credit,
                retirement_limits: year.retirement_limits,
                mileage_rates: year.mileage_rates,
            })?;
        }

        Ok(table)
    }

    /// `tax_year_*.toml` files in `dir`, sorted by name.
    fn constants_files(dir: &Path) -> Result<Vec<PathBuf>, RulesLoaderError> {
        let entries = std::fs::read_dir(dir).map_err(|e| RulesLoaderError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| RulesLoaderError::io(dir, e))?.path();
            let is_constants = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(CONSTANTS_PREFIX) && name.ends_with(".toml"));
            if is_constants {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
