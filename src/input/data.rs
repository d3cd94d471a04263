//! Input record for a single rate calculation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assumptions::RateConstants;
use crate::error::{RateError, Result};

/// Highest academic qualification held (single-select)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualification {
    #[default]
    None,
    Bachelor,
    Master,
    Phd,
}

impl Qualification {
    pub const ALL: [Qualification; 4] = [
        Qualification::None,
        Qualification::Bachelor,
        Qualification::Master,
        Qualification::Phd,
    ];

    /// Highest of a set of held qualifications; PhD dominates
    pub fn highest<I: IntoIterator<Item = Qualification>>(held: I) -> Self {
        held.into_iter().max().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Qualification::None => "none",
            Qualification::Bachelor => "bachelor",
            Qualification::Master => "master",
            Qualification::Phd => "phd",
        }
    }

    /// Label used in the calculation trace
    pub fn label(&self) -> &'static str {
        match self {
            Qualification::None => "No qualification",
            Qualification::Bachelor => "Bachelor's",
            Qualification::Master => "Master's",
            Qualification::Phd => "PhD",
        }
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Qualification {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Qualification::None),
            "bachelor" | "bachelors" => Ok(Qualification::Bachelor),
            "master" | "masters" => Ok(Qualification::Master),
            "phd" | "doctorate" => Ok(Qualification::Phd),
            _ => Err(RateError::UnknownQualification(s.to_string())),
        }
    }
}

/// Attributes of the person whose hourly rate is being computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub age: u32,
    pub is_ex_president: bool,
    pub is_intern: bool,
    pub is_member: bool,
    /// Account balance, currency units
    pub balance: f64,
    pub qualification: Qualification,
    /// IAS used for this calculation
    pub ias: f64,
}

impl CalculationInput {
    /// Input with no status flags, zero balance and no qualification
    pub fn new(age: u32, constants: &RateConstants) -> Self {
        Self {
            age,
            is_ex_president: false,
            is_intern: false,
            is_member: false,
            balance: 0.0,
            qualification: Qualification::None,
            ias: constants.ias,
        }
    }

    /// Reject records that break the calculator contract
    pub fn validate(&self) -> Result<()> {
        if !(self.ias.is_finite() && self.ias > 0.0) {
            return Err(RateError::invalid_input(format!("IAS must be positive, got {}", self.ias)));
        }
        if !self.balance.is_finite() || self.balance < 0.0 {
            return Err(RateError::invalid_input(format!(
                "balance must be non-negative, got {}",
                self.balance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_parse() {
        assert_eq!("phd".parse::<Qualification>().unwrap(), Qualification::Phd);
        assert_eq!("Master".parse::<Qualification>().unwrap(), Qualification::Master);
        assert_eq!(" bachelors ".parse::<Qualification>().unwrap(), Qualification::Bachelor);
        assert_eq!("".parse::<Qualification>().unwrap(), Qualification::None);

        let err = "diploma".parse::<Qualification>().unwrap_err();
        assert!(matches!(err, RateError::UnknownQualification(ref s) if s == "diploma"));
    }

    #[test]
    fn test_phd_dominates() {
        let held = [Qualification::Master, Qualification::Phd, Qualification::Bachelor];
        assert_eq!(Qualification::highest(held), Qualification::Phd);
        assert_eq!(Qualification::highest([]), Qualification::None);
    }

    #[test]
    fn test_validate() {
        let constants = RateConstants::default();
        let input = CalculationInput::new(30, &constants);
        assert!(input.validate().is_ok());

        let zero_ias = CalculationInput { ias: 0.0, ..input };
        assert!(matches!(zero_ias.validate(), Err(RateError::InvalidInput(_))));

        let negative_balance = CalculationInput { balance: -1.0, ..input };
        assert!(matches!(negative_balance.validate(), Err(RateError::InvalidInput(_))));

        let nan_ias = CalculationInput { ias: f64::NAN, ..input };
        assert!(nan_ias.validate().is_err());
    }
}
