//! Loads tax rules and the pricing table from data files.
//!
//! A rules directory looks like:
//!
//! ```text
//! rules/
//!   tax_brackets.csv
//!   tax_year_2024.toml
//!   tax_year_2025.toml
//!   pricing.toml
//! ```

pub mod brackets;
pub mod constants;
pub mod error;
pub mod loader;
pub mod pricing;

pub use brackets::{TaxBracketLoader, TaxBracketRecord};
pub use constants::YearConstants;
pub use error::RulesLoaderError;
pub use loader::RulesLoader;
pub use pricing::{load_pricing, parse_pricing};

/// Price list file name inside a rules directory.
pub const PRICING_FILE: &str = "pricing.toml";
