//! Derived series for charts and tables
//!
//! Both series reuse the calculator's formula: the age sweep is the rounded
//! base-plus-seniority rate without any modifiers, the seniority curve is the
//! raw bonus per seniority year, extended past the cap to show it flattening.

use serde::{Deserialize, Serialize};

use crate::assumptions::RateAssumptions;
use crate::calculator::{base_plus_seniority, seniority_bonus};
use crate::error::{RateError, Result};

/// One column of the rate-by-age table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeSweepPoint {
    pub age: u32,
    pub hourly: f64,
    /// Age is past the point where seniority stops counting
    pub capped: bool,
}

/// One point of the seniority bonus curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeniorityPoint {
    pub seniority: u32,
    pub bonus: f64,
    /// Seniority is beyond the cap, so the bonus is flat
    pub beyond_cap: bool,
}

/// Ages covered by the rate-by-age table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { start: 23, end: 65, step: 5 }
    }
}

impl AgeRange {
    pub fn ages(&self) -> impl Iterator<Item = u32> {
        (self.start..=self.end).step_by(self.step.max(1) as usize)
    }
}

/// Series generator over one set of assumptions and an IAS
#[derive(Debug, Clone)]
pub struct SweepRunner {
    assumptions: RateAssumptions,
    ias: f64,
}

impl SweepRunner {
    /// Runner at the configured default IAS
    pub fn new(assumptions: RateAssumptions) -> Result<Self> {
        Self::with_ias(assumptions, assumptions.constants.ias)
    }

    pub fn with_ias(assumptions: RateAssumptions, ias: f64) -> Result<Self> {
        assumptions.validate()?;
        if !(ias.is_finite() && ias > 0.0) {
            return Err(RateError::invalid_input(format!("IAS must be positive, got {ias}")));
        }
        Ok(Self { assumptions, ias })
    }

    /// Rounded base-plus-seniority rate for each age in the range
    pub fn age_sweep(&self, range: AgeRange) -> Vec<AgeSweepPoint> {
        let capping_age = self.assumptions.constants.capping_age();
        range
            .ages()
            .map(|age| AgeSweepPoint {
                age,
                hourly: base_plus_seniority(age, self.ias, &self.assumptions),
                capped: age > capping_age,
            })
            .collect()
    }

    /// Raw seniority bonus for 0..=max_seniority
    pub fn seniority_curve(&self, max_seniority: u32) -> Vec<SeniorityPoint> {
        let constants = &self.assumptions.constants;
        (0..=max_seniority)
            .map(|seniority| SeniorityPoint {
                seniority,
                bonus: seniority_bonus(seniority, self.ias, constants),
                beyond_cap: seniority > constants.max_seniority,
            })
            .collect()
    }

    /// Seniority curve running ten years past the cap
    pub fn default_seniority_curve(&self) -> Vec<SeniorityPoint> {
        self.seniority_curve(self.assumptions.constants.max_seniority.saturating_add(10))
    }
}
