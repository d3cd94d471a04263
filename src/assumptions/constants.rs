//! Reference constants: IAS, hourly divisor, base factor, seniority cap and VAT

use serde::{Deserialize, Serialize};

use crate::error::{RateError, Result};

/// Default IAS ("Indexante dos Apoios Sociais", Portugal 2023)
pub const DEFAULT_IAS: f64 = 480.43;

/// Average working hours per month used to derive the hourly IAS
pub const HOURS_PER_MONTH_DIVISOR: f64 = 176.0;

/// Multiplier on the hourly IAS giving a base hourly of roughly 5
pub const BASE_HOURLY_FACTOR: f64 = 1.85;

/// Seniority years counted by the bonus function
pub const MAX_SENIORITY: u32 = 20;

/// VAT applied to commercial tiers
pub const VAT_RATE: f64 = 0.23;

/// Age at which seniority starts accruing
pub const SENIORITY_START_AGE: u32 = 23;

/// Upper bound accepted for the start age and the seniority cap
pub const MAX_CONFIGURED_YEARS: u32 = 150;

/// Constants table shared by every calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateConstants {
    /// Default IAS for inputs that do not carry their own
    pub ias: f64,

    pub hours_per_month_divisor: f64,

    pub base_hourly_factor: f64,

    /// Cap, in years, on the seniority fed to the bonus function
    pub max_seniority: u32,

    pub vat_rate: f64,

    pub seniority_start_age: u32,
}

impl Default for RateConstants {
    fn default() -> Self {
        Self {
            ias: DEFAULT_IAS,
            hours_per_month_divisor: HOURS_PER_MONTH_DIVISOR,
            base_hourly_factor: BASE_HOURLY_FACTOR,
            max_seniority: MAX_SENIORITY,
            vat_rate: VAT_RATE,
            seniority_start_age: SENIORITY_START_AGE,
        }
    }
}

impl RateConstants {
    /// Hourly equivalent of an IAS value (IASH)
    pub fn hourly_index(&self, ias: f64) -> f64 {
        ias / self.hours_per_month_divisor
    }

    /// Base hourly rate before any seniority bonus
    pub fn base_hourly(&self, ias: f64) -> f64 {
        self.hourly_index(ias) * self.base_hourly_factor
    }

    /// First age past which extra years no longer raise the rate
    pub fn capping_age(&self) -> u32 {
        self.seniority_start_age.saturating_add(self.max_seniority)
    }

    /// Reject tables that would make the formula meaningless
    pub fn validate(&self) -> Result<()> {
        if !(self.ias.is_finite() && self.ias > 0.0) {
            return Err(RateError::invalid_assumption("ias", format!("must be positive, got {}", self.ias)));
        }
        if !(self.hours_per_month_divisor.is_finite() && self.hours_per_month_divisor > 0.0) {
            return Err(RateError::invalid_assumption(
                "hours_per_month_divisor",
                format!("must be positive, got {}", self.hours_per_month_divisor),
            ));
        }
        if !(self.base_hourly_factor.is_finite() && self.base_hourly_factor >= 0.0) {
            return Err(RateError::invalid_assumption(
                "base_hourly_factor",
                format!("must be non-negative, got {}", self.base_hourly_factor),
            ));
        }
        if !(self.vat_rate.is_finite() && self.vat_rate >= 0.0) {
            return Err(RateError::invalid_assumption(
                "vat_rate",
                format!("must be non-negative, got {}", self.vat_rate),
            ));
        }
        for (name, years) in [
            ("max_seniority", self.max_seniority),
            ("seniority_start_age", self.seniority_start_age),
        ] {
            if years > MAX_CONFIGURED_YEARS {
                return Err(RateError::invalid_assumption(
                    name,
                    format!("must be at most {MAX_CONFIGURED_YEARS}, got {years}"),
                ));
            }
        }
        Ok(())
    }
}
