//! Error types for rate calculation and assumption loading

use thiserror::Error;

/// Errors raised by the calculator and its loaders
#[derive(Debug, Error)]
pub enum RateError {
    /// Input violates the calculator contract (non-positive IAS, negative balance, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Qualification string is not one of none, bachelor, master, phd
    #[error("unknown academic qualification: {0:?}")]
    UnknownQualification(String),

    /// Bad configuration value or unknown configuration key
    #[error("invalid assumption {name}: {reason}")]
    InvalidAssumption { name: String, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RateError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        RateError::InvalidInput(message.into())
    }

    pub(crate) fn invalid_assumption(name: impl Into<String>, reason: impl Into<String>) -> Self {
        RateError::InvalidAssumption {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RateError>;
