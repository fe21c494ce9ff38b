use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::calculations::brackets::progressive_tax;
use tax_core::{ByFilingStatus, FilingStatus, TaxBracket, TaxBracketSchedule};
use tracing::debug;

use crate::RulesLoaderError;

/// IRS rate schedule for each filing status.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
pub fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatus, RulesLoaderError> {
    match schedule {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedFilingJointly),
        "Y-2" => Ok(FilingStatus::MarriedFilingSeparately),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        _ => Err(RulesLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

pub fn filing_status_to_schedule(status: FilingStatus) -> &'static str {
    match status {
        FilingStatus::Single => "X",
        FilingStatus::MarriedFilingJointly => "Y-1",
        FilingStatus::MarriedFilingSeparately => "Y-2",
        FilingStatus::HeadOfHousehold => "Z",
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: The minimum income for this bracket
/// - `max_income`: The maximum income for this bracket (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
/// - `base_tax`: Optional cumulative tax at `min_income`, as printed in the
///   IRS tables. When present it is checked against the computed value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub base_tax: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Schedules for every filing status of one tax year.
pub type YearSchedules = ByFilingStatus<TaxBracketSchedule>;

/// Loader for tax bracket data from CSV files.
///
/// Rows are grouped by `(tax_year, schedule)` in file order and each group
/// becomes one validated [`TaxBracketSchedule`].
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, RulesLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build the schedules for every tax year present in `records`.
    ///
    /// # Errors
    ///
    /// * [`RulesLoaderError::InvalidSchedule`] for an unknown schedule code.
    /// * [`RulesLoaderError::MissingSchedule`] when a year lacks one of the
    ///   four schedules.
    /// * [`RulesLoaderError::Rules`] when a schedule is not contiguous.
    /// * [`RulesLoaderError::InconsistentBaseTax`] when a stated base tax
    ///   disagrees with the brackets below it.
    pub fn build(
        records: &[TaxBracketRecord]
    ) -> Result<BTreeMap<i32, YearSchedules>, RulesLoaderError> {
        let mut groups: BTreeMap<i32, BTreeMap<FilingStatus, Vec<&TaxBracketRecord>>> =
            BTreeMap::new();

        for record in records {
            let status = schedule_to_filing_status(&record.schedule)?;
            groups
                .entry(record.tax_year)
                .or_default()
                .entry(status)
                .or_default()
                .push(record);
        }

        let mut years = BTreeMap::new();
        for (tax_year, mut by_status) in groups {
            let mut take = |status: FilingStatus| -> Result<TaxBracketSchedule, RulesLoaderError> {
                let rows = by_status
                    .remove(&status)
                    .ok_or(RulesLoaderError::MissingSchedule {
                        tax_year,
                        schedule: filing_status_to_schedule(status),
                    })?;
                Self::schedule_from_rows(tax_year, &rows)
            };

            let schedules = ByFilingStatus {
                single: take(FilingStatus::Single)?,
                married_filing_jointly: take(FilingStatus::MarriedFilingJointly)?,
                married_filing_separately: take(FilingStatus::MarriedFilingSeparately)?,
                head_of_household: take(FilingStatus::HeadOfHousehold)?,
            };
            debug!(tax_year, "built bracket schedules");
            years.insert(tax_year, schedules);
        }

        Ok(years)
    }

    fn schedule_from_rows(
        tax_year: i32,
        rows: &[&TaxBracketRecord],
    ) -> Result<TaxBracketSchedule, RulesLoaderError> {
        let brackets = rows
            .iter()
            .map(|r| TaxBracket::new(r.min_income, r.max_income, r.rate))
            .collect();
        let schedule = TaxBracketSchedule::new(brackets)?;

        for row in rows {
            let Some(stated) = row.base_tax else {
                continue;
            };
            let computed = progressive_tax(&schedule, row.min_income);
            if computed != stated {
                return Err(RulesLoaderError::InconsistentBaseTax {
                    tax_year,
                    schedule: row.schedule.clone(),
                    min_income: row.min_income,
                    stated,
                    computed,
                });
            }
        }

        Ok(schedule)
    }
}
