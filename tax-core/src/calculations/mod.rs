//! Tax arithmetic.
//!
//! The submodules hold the raw formulas over decimals and rule fragments;
//! [`TaxCalculationEngine`] binds them to a [`crate::TaxRuleTable`] and
//! adds input validation.

pub mod brackets;
pub mod common;
pub mod credits;
pub mod deductions;
pub mod engine;
pub mod estimated;

pub use engine::TaxCalculationEngine;
