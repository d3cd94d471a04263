//! Calculation output: the rounded rate, its tiers and the derivation trace

use serde::{Deserialize, Serialize};

use crate::assumptions::RateAssumptions;

/// Intermediate values of the numeric path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub seniority: u32,
    pub capped_seniority: u32,
    /// IAS / divisor
    pub hourly_index: f64,
    pub base_hourly: f64,
    pub seniority_bonus: f64,
    /// Product of the status multipliers that applied
    pub status_multiplier: f64,
    /// Fractional balance boost (0.25 = +25%)
    pub balance_boost: f64,
    pub qualification_multiplier: f64,
    /// Hourly rate just before quarter rounding
    pub unrounded_hourly: f64,
}

/// Prices derived from the rounded hourly rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRates {
    pub base: f64,
    pub internal: f64,
    pub commercial: f64,
    pub commercial_strategic: f64,
    pub commercial_vat: f64,
    pub commercial_strategic_vat: f64,
}

impl TierRates {
    /// Derive every tier from the rounded rate; no further rounding happens here
    pub fn from_hourly(hourly: f64, assumptions: &RateAssumptions) -> Self {
        let vat = 1.0 + assumptions.constants.vat_rate;
        let commercial = hourly * assumptions.modifiers.commercial_markup;
        let commercial_strategic = commercial * assumptions.modifiers.strategic_factor;

        Self {
            base: hourly,
            internal: hourly,
            commercial,
            commercial_strategic,
            commercial_vat: commercial * vat,
            commercial_strategic_vat: commercial_strategic * vat,
        }
    }

    /// Rate charged for the chosen service options
    pub fn select(&self, options: &ServiceOptions) -> f64 {
        match (options.service_type, options.strategic, options.include_vat) {
            (ServiceType::Internal, _, _) => self.internal,
            (ServiceType::Commercial, false, false) => self.commercial,
            (ServiceType::Commercial, false, true) => self.commercial_vat,
            (ServiceType::Commercial, true, false) => self.commercial_strategic,
            (ServiceType::Commercial, true, true) => self.commercial_strategic_vat,
        }
    }

    /// Span from the internal rate up to commercial with VAT
    pub fn range(&self) -> (f64, f64) {
        (self.internal, self.commercial_vat)
    }
}

/// Who the service is delivered to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Between members, reference value unchanged
    #[default]
    Internal,
    /// To third parties, invoiced through the cooperative
    Commercial,
}

/// Service options selecting one of the tier rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOptions {
    pub service_type: ServiceType,
    /// Non-profit, local or strategic initiative (commercial only)
    pub strategic: bool,
    /// Commercial only
    pub include_vat: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::internal()
    }
}

impl ServiceOptions {
    pub fn internal() -> Self {
        Self {
            service_type: ServiceType::Internal,
            strategic: false,
            include_vat: true,
        }
    }

    /// Commercial service; VAT is included by default
    pub fn commercial() -> Self {
        Self {
            service_type: ServiceType::Commercial,
            strategic: false,
            include_vat: true,
        }
    }

    pub fn strategic(mut self, strategic: bool) -> Self {
        self.strategic = strategic;
        self
    }

    pub fn with_vat(mut self, include_vat: bool) -> Self {
        self.include_vat = include_vat;
        self
    }

    /// Whether the selected value carries VAT
    pub fn charges_vat(&self) -> bool {
        self.service_type == ServiceType::Commercial && self.include_vat
    }
}

/// Full result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    /// Hourly rate rounded to the nearest 0.25
    pub hourly_rate: f64,
    /// Human-readable derivation, in order
    pub steps: Vec<String>,
    pub tier_rates: TierRates,
    pub breakdown: RateBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tier_invariants() {
        let assumptions = RateAssumptions::default();
        let tiers = TierRates::from_hourly(12.25, &assumptions);

        assert_eq!(tiers.internal, tiers.base);
        assert_relative_eq!(tiers.commercial, 12.25 * 1.5);
        assert_relative_eq!(tiers.commercial_strategic, tiers.commercial * 0.75);
        assert_relative_eq!(tiers.commercial_vat, tiers.commercial * 1.23, epsilon = 1e-12);
        assert_relative_eq!(tiers.commercial_strategic_vat, 12.25 * 1.5 * 0.75 * 1.23, epsilon = 1e-12);
    }

    #[test]
    fn test_select() {
        let tiers = TierRates::from_hourly(10.0, &RateAssumptions::default());

        assert_eq!(tiers.select(&ServiceOptions::internal()), 10.0);
        // Strategic and VAT do not apply to internal services
        assert_eq!(tiers.select(&ServiceOptions::internal().strategic(true)), 10.0);
        assert_eq!(tiers.select(&ServiceOptions::commercial()), tiers.commercial_vat);
        assert_eq!(tiers.select(&ServiceOptions::commercial().with_vat(false)), tiers.commercial);
        assert_eq!(
            tiers.select(&ServiceOptions::commercial().strategic(true)),
            tiers.commercial_strategic_vat
        );
        assert_eq!(
            tiers.select(&ServiceOptions::commercial().strategic(true).with_vat(false)),
            tiers.commercial_strategic
        );
    }

    #[test]
    fn test_range_and_vat_flag() {
        let tiers = TierRates::from_hourly(8.0, &RateAssumptions::default());
        let (min, max) = tiers.range();
        assert_eq!(min, 8.0);
        assert_relative_eq!(max, 8.0 * 1.5 * 1.23, epsilon = 1e-12);

        assert!(ServiceOptions::commercial().charges_vat());
        assert!(!ServiceOptions::internal().charges_vat());
    }
}
