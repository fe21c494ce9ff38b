use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    /// `None` for the top bracket.
    pub max_income: Option<Decimal>,
    /// Marginal rate as a fraction (0.22 for 22%).
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Width of the bracket, or `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }
}

/// Progressive rate schedule for one filing status.
///
/// Outside this crate a schedule can only be obtained through
/// [`TaxBracketSchedule::new`] or deserialization, which goes through it, so
/// every instance satisfies:
///
/// - at least one bracket, the first starting at zero
/// - `brackets[i].max_income == Some(brackets[i + 1].min_income)`
/// - only the final bracket is unbounded
/// - rates lie in `[0, 1]` and never decrease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxBracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl TaxBracketSchedule {
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, TaxError> {
        let invalid = |reason: String| Err(TaxError::InvalidBracketSchedule(reason));

        let Some(first) = brackets.first() else {
            return invalid("schedule has no brackets".to_string());
        };
        if !first.min_income.is_zero() {
            return invalid(format!(
                "first bracket must start at 0, starts at {}",
                first.min_income
            ));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return invalid(format!(
                    "bracket {index} rate {} is outside [0, 1]",
                    bracket.tax_rate
                ));
            }

            let is_last = index + 1 == brackets.len();
            match (bracket.max_income, is_last) {
                (None, true) => {}
                (None, false) => {
                    return invalid(format!("bracket {index} is unbounded but not the last"));
                }
                (Some(_), true) => {
                    return invalid("final bracket must be unbounded".to_string());
                }
                (Some(max), false) => {
                    if max <= bracket.min_income {
                        return invalid(format!(
                            "bracket {index} upper bound {max} is not above its lower bound {}",
                            bracket.min_income
                        ));
                    }
                    let next = &brackets[index + 1];
                    if next.min_income != max {
                        return invalid(format!(
                            "bracket {index} ends at {max} but bracket {} starts at {}",
                            index + 1,
                            next.min_income
                        ));
                    }
                    if next.tax_rate < bracket.tax_rate {
                        return invalid(format!(
                            "bracket {} rate {} is below the preceding rate {}",
                            index + 1,
                            next.tax_rate,
                            bracket.tax_rate
                        ));
                    }
                }
            }
        }

        Ok(Self { brackets })
    }

    /// Builds a schedule from compiled-in constants without re-running the
    /// checks in [`TaxBracketSchedule::new`]. Tests re-validate every
    /// built-in schedule.
    pub(crate) fn from_static(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    /// Brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.tax_rate)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxBracketSchedule {
    type Error = TaxError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxBracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: TaxBracketSchedule) -> Self {
        schedule.brackets
    }
}
