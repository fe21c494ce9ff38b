use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    #[serde(alias = "S")]
    Single,
    #[serde(alias = "MFJ")]
    MarriedFilingJointly,
    #[serde(alias = "MFS")]
    MarriedFilingSeparately,
    #[serde(alias = "HOH")]
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 4] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
    ];

    /// Short IRS-style code, as used in CSV inputs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedFilingJointly => "marriedFilingJointly",
            Self::MarriedFilingSeparately => "marriedFilingSeparately",
            Self::HeadOfHousehold => "headOfHousehold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Accepts the wire name, its kebab/snake spelling, or the short code.
    ///
    /// Matching ignores ASCII case and separators, so `"married-filing-jointly"`,
    /// `"married_filing_jointly"` and `"marriedFilingJointly"` are equivalent.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "s" | "single" => Some(Self::Single),
            "mfj" | "marriedfilingjointly" => Some(Self::MarriedFilingJointly),
            "mfs" | "marriedfilingseparately" => Some(Self::MarriedFilingSeparately),
            "hoh" | "headofhousehold" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }
}

impl FromStr for FilingStatus {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::UnsupportedFilingStatus(s.to_string()))
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_codes_and_names() {
        assert_eq!(FilingStatus::parse("S"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::parse("marriedFilingJointly"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse("married-filing-separately"),
            Some(FilingStatus::MarriedFilingSeparately)
        );
        assert_eq!(
            FilingStatus::parse("head_of_household"),
            Some(FilingStatus::HeadOfHousehold)
        );
    }

    #[test]
    fn from_str_rejects_unknown_status() {
        let result = "QSS".parse::<FilingStatus>();

        assert_eq!(
            result,
            Err(TaxError::UnsupportedFilingStatus("QSS".to_string()))
        );
    }

    #[test]
    fn empty_string_is_not_single() {
        assert_eq!(FilingStatus::parse(""), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in FilingStatus::ALL {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(status));
            assert_eq!(FilingStatus::parse(status.code()), Some(status));
        }
    }

    #[test]
    fn serde_uses_camel_case_and_accepts_codes() {
        let json = serde_json::to_string(&FilingStatus::HeadOfHousehold).unwrap();
        assert_eq!(json, "\"headOfHousehold\"");

        let parsed: FilingStatus = serde_json::from_str("\"MFJ\"").unwrap();
        assert_eq!(parsed, FilingStatus::MarriedFilingJointly);
    }
}
