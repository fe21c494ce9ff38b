//! Tax calculation and service pricing engine.
//!
//! - [`TaxRuleTable`] holds the per-year constants.
//! - [`calculations::TaxCalculationEngine`] computes federal tax, the child
//!   tax credit, mileage deductions, quarterly estimates and tax rates.
//! - [`pricing::PricingEngine`] scores intake complexity and quotes prices.
//!
//! Everything here is pure computation over immutable inputs.

pub mod calculations;
pub mod error;
pub mod models;
pub mod pricing;
pub mod rules;

pub use calculations::TaxCalculationEngine;
pub use error::TaxError;
pub use models::*;
pub use pricing::{PricingEngine, PricingTable};
pub use rules::TaxRuleTable;
