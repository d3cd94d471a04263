//! Rate assumptions: the constants table and the modifier schedule

mod constants;
mod modifiers;
pub mod loader;

pub use constants::{
    RateConstants, BASE_HOURLY_FACTOR, DEFAULT_IAS, HOURS_PER_MONTH_DIVISOR, MAX_CONFIGURED_YEARS,
    MAX_SENIORITY, SENIORITY_START_AGE, VAT_RATE,
};
pub use modifiers::Modifiers;

use std::path::Path;

use crate::error::Result;

/// Container for everything a calculation needs besides the input record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateAssumptions {
    pub constants: RateConstants,
    pub modifiers: Modifiers,
}

impl RateAssumptions {
    pub fn new(constants: RateConstants, modifiers: Modifiers) -> Self {
        Self { constants, modifiers }
    }

    /// Load overrides from the default location (data/rate_assumptions.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from a specific CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        loader::load_assumptions(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.constants.validate()?;
        self.modifiers.validate()
    }
}
