//! Hourly Rate - calculator for IAS-indexed hourly pay rates
//!
//! This library provides:
//! - The rate calculation (base plus seniority, status, balance and qualification multipliers)
//! - Service tier rates (internal, commercial, strategic, with and without VAT)
//! - A human-readable trace of every calculation step
//! - Age and seniority series for tables and charts
//! - CSV loading of assumption overrides and input batches

pub mod error;
pub mod assumptions;
pub mod input;
pub mod calculator;
pub mod sweep;

// Re-export commonly used types
pub use error::{RateError, Result};
pub use assumptions::{RateAssumptions, RateConstants, Modifiers};
pub use input::{CalculationInput, Qualification};
pub use calculator::{compute, RateCalculator, RateResult, TierRates, ServiceOptions, ServiceType};
pub use sweep::{SweepRunner, AgeRange};
