//! Seniority and the continuous seniority growth function f(s)
//!
//! f(s) = 4(1 - e^(-0.15 s))
//!      + 0.08 max(0, s - 10) e^(-0.1 max(0, s - 10))
//!      + 0.02 max(0, s - 15)
//!
//! The early term gives rapid growth in the first decade, the mid term a
//! tapering bump after ten years and the late term a small linear slope after
//! fifteen. Each term is non-decreasing in s, and s is capped before use.

use serde::{Deserialize, Serialize};

use crate::assumptions::RateConstants;

/// Seniority of a given age, before and after the cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seniority {
    /// Years since the start age (0 below it)
    pub years: u32,
    /// Years fed to the bonus function
    pub capped: u32,
}

impl Seniority {
    pub fn from_age(age: u32, constants: &RateConstants) -> Self {
        let years = age.saturating_sub(constants.seniority_start_age);
        Self {
            years,
            capped: years.min(constants.max_seniority),
        }
    }

    pub fn is_capped(&self) -> bool {
        self.years > self.capped
    }
}

/// Career stage used to describe the bonus in the calculation trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerStage {
    Junior,
    EarlyCareer,
    MidEarlyCareer,
    MidCareer,
    Capped,
}

impl CareerStage {
    pub fn from_years(years: u32, max_seniority: u32) -> Self {
        match years {
            0..=1 => CareerStage::Junior,
            2..=5 => CareerStage::EarlyCareer,
            6..=10 => CareerStage::MidEarlyCareer,
            y if y <= max_seniority => CareerStage::MidCareer,
            _ => CareerStage::Capped,
        }
    }

    pub fn describe(&self, max_seniority: u32) -> String {
        match self {
            CareerStage::Junior => "New junior with minimal seniority bonus".to_string(),
            CareerStage::EarlyCareer => "Early career growth (rapid increase)".to_string(),
            CareerStage::MidEarlyCareer => "Mid-early career growth (strong increase)".to_string(),
            CareerStage::MidCareer => "Mid-career growth (moderate increase)".to_string(),
            CareerStage::Capped => format!("Maximum seniority reached (capped at {max_seniority} years)"),
        }
    }
}

/// The three components of f(s) for one seniority value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthComponents {
    pub early: f64,
    pub mid: f64,
    pub late: f64,
}

impl GrowthComponents {
    pub fn at(seniority: f64) -> Self {
        let past_ten = (seniority - 10.0).max(0.0);
        Self {
            early: 4.0 * (1.0 - (-0.15 * seniority).exp()),
            mid: 0.08 * past_ten * (-0.1 * past_ten).exp(),
            late: 0.02 * (seniority - 15.0).max(0.0),
        }
    }

    /// f(s)
    pub fn total(&self) -> f64 {
        self.early + self.mid + self.late
    }
}

/// Growth factor f(s), with s capped at the maximum seniority
pub fn growth_factor(seniority: u32, constants: &RateConstants) -> f64 {
    let capped = seniority.min(constants.max_seniority);
    GrowthComponents::at(f64::from(capped)).total()
}

/// Seniority bonus in currency per hour: IASH x f(min(s, MAX))
pub fn seniority_bonus(seniority: u32, ias: f64, constants: &RateConstants) -> f64 {
    constants.hourly_index(ias) * growth_factor(seniority, constants)
}
