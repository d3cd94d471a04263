//! Multipliers applied on top of base plus seniority, and the tier factors

use serde::{Deserialize, Serialize};

use crate::error::{RateError, Result};
use crate::input::Qualification;

/// Status, balance, qualification and service tier factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Ex board chair bonus
    pub ex_president: f64,

    /// Intern penalty
    pub intern: f64,

    /// Member bonus
    pub member: f64,

    /// Largest boost the balance can give (0.50 = +50%)
    pub balance_boost_cap: f64,

    /// Balance at which the boost saturates
    pub balance_saturation: f64,

    pub phd: f64,
    pub master: f64,
    pub bachelor: f64,

    /// Markup of commercial services over the internal rate
    pub commercial_markup: f64,

    /// Share of the commercial rate kept for strategic services
    pub strategic_factor: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            ex_president: 1.10,
            intern: 0.50,
            member: 1.10,
            balance_boost_cap: 0.50,
            balance_saturation: 10_000.0,
            phd: 1.35,
            master: 1.20,
            bachelor: 1.12,
            commercial_markup: 1.5,
            strategic_factor: 0.75,
        }
    }
}

impl Modifiers {
    /// Fractional boost for a balance, linear up to the saturation point
    pub fn balance_boost(&self, balance: f64) -> f64 {
        if balance <= 0.0 {
            return 0.0;
        }
        (balance / self.balance_saturation * self.balance_boost_cap).min(self.balance_boost_cap)
    }

    /// Multiplier for the highest qualification held
    pub fn qualification_multiplier(&self, qualification: Qualification) -> f64 {
        match qualification {
            Qualification::Phd => self.phd,
            Qualification::Master => self.master,
            Qualification::Bachelor => self.bachelor,
            Qualification::None => 1.0,
        }
    }

    /// Product of the status multipliers that apply
    pub fn status_multiplier(&self, ex_president: bool, intern: bool, member: bool) -> f64 {
        let mut multiplier = 1.0;
        if ex_president {
            multiplier *= self.ex_president;
        }
        if intern {
            multiplier *= self.intern;
        }
        if member {
            multiplier *= self.member;
        }
        multiplier
    }

    pub fn validate(&self) -> Result<()> {
        let factors = [
            ("ex_president", self.ex_president),
            ("intern", self.intern),
            ("member", self.member),
            ("balance_boost_cap", self.balance_boost_cap),
            ("phd", self.phd),
            ("master", self.master),
            ("bachelor", self.bachelor),
            ("commercial_markup", self.commercial_markup),
            ("strategic_factor", self.strategic_factor),
        ];
        for (name, value) in factors {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RateError::invalid_assumption(name, format!("must be non-negative, got {value}")));
            }
        }
        if !(self.balance_saturation.is_finite() && self.balance_saturation > 0.0) {
            return Err(RateError::invalid_assumption(
                "balance_saturation",
                format!("must be positive, got {}", self.balance_saturation),
            ));
        }
        Ok(())
    }
}
