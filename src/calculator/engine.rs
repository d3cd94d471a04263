//! Core rate calculation: base plus seniority, multipliers, quarter rounding

use crate::assumptions::RateAssumptions;
use crate::error::Result;
use crate::input::{CalculationInput, Qualification};
use super::result::{RateBreakdown, RateResult, TierRates};
use super::seniority::{seniority_bonus, CareerStage, Seniority};

/// Format a currency amount the way the trace shows it
fn eur(amount: f64) -> String {
    format!("{amount:.2}€")
}

/// Percentage change a multiplier represents, e.g. 1.10 -> "10%", 0.50 -> "50%"
fn pct(multiplier: f64) -> String {
    format!("{:.0}%", ((multiplier - 1.0) * 100.0).abs())
}

/// Round to the nearest 0.25, halves away from zero
pub fn round_to_quarter(amount: f64) -> f64 {
    (amount * 4.0).round() / 4.0
}

/// Hourly rate from base plus seniority only, rounded (no status, balance or qualification)
pub fn base_plus_seniority(age: u32, ias: f64, assumptions: &RateAssumptions) -> f64 {
    let constants = &assumptions.constants;
    let seniority = Seniority::from_age(age, constants);
    round_to_quarter(constants.base_hourly(ias) + seniority_bonus(seniority.capped, ias, constants))
}

/// Pure rate calculator over a fixed set of assumptions
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    assumptions: RateAssumptions,
}

impl RateCalculator {
    pub fn new(assumptions: RateAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &RateAssumptions {
        &self.assumptions
    }

    /// Compute the hourly rate, its tiers and the derivation trace
    ///
    /// Fails with `InvalidAssumption` on an unusable assumptions table and with
    /// `InvalidInput` on a non-positive IAS or a negative balance; there are no
    /// partial results.
    pub fn compute(&self, input: &CalculationInput) -> Result<RateResult> {
        self.assumptions.validate()?;
        input.validate()?;

        let constants = &self.assumptions.constants;
        let modifiers = &self.assumptions.modifiers;
        let mut steps = Vec::new();

        // Seniority
        let seniority = Seniority::from_age(input.age, constants);
        if seniority.is_capped() {
            steps.push(format!(
                "Seniority: max(0, {} - {}) = {} years (capped at {} years)",
                input.age, constants.seniority_start_age, seniority.years, constants.max_seniority
            ));
        } else {
            steps.push(format!(
                "Seniority: max(0, {} - {}) = {} years",
                input.age, constants.seniority_start_age, seniority.years
            ));
        }

        // Base hourly
        let hourly_index = constants.hourly_index(input.ias);
        let base_hourly = constants.base_hourly(input.ias);
        steps.push(format!(
            "Base hourly rate: ({} ÷ {}) × {} = {} × {} = {}",
            eur(input.ias),
            constants.hours_per_month_divisor,
            constants.base_hourly_factor,
            eur(hourly_index),
            constants.base_hourly_factor,
            eur(base_hourly)
        ));
        steps.push(format!(
            "Note: {} factor chosen to make base hourly approximately 5€",
            constants.base_hourly_factor
        ));

        // Seniority bonus, fed the capped value
        let bonus = seniority_bonus(seniority.capped, input.ias, constants);
        let stage = CareerStage::from_years(seniority.years, constants.max_seniority);
        steps.push(format!(
            "Seniority bonus: {} ({})",
            eur(bonus),
            stage.describe(constants.max_seniority)
        ));

        let mut hourly = base_hourly + bonus;
        steps.push(format!(
            "Base + Seniority: {} + {} = {}",
            eur(base_hourly),
            eur(bonus),
            eur(hourly)
        ));

        // Status multipliers
        let statuses = [
            (input.is_ex_president, "Ex Board Chair bonus", modifiers.ex_president),
            (input.is_intern, "Intern penalty", modifiers.intern),
            (input.is_member, "Member bonus", modifiers.member),
        ];
        for (applies, label, multiplier) in statuses {
            if applies {
                let before = hourly;
                hourly *= multiplier;
                steps.push(format!(
                    "{} ({}): {} × {:.2} = {}",
                    label,
                    pct(multiplier),
                    eur(before),
                    multiplier,
                    eur(hourly)
                ));
            }
        }

        // Balance
        let balance_boost = modifiers.balance_boost(input.balance);
        if input.balance > 0.0 {
            let before = hourly;
            hourly *= 1.0 + balance_boost;
            steps.push(format!(
                "Balance bonus ({:.2}%): {} × {:.2} = {}",
                balance_boost * 100.0,
                eur(before),
                1.0 + balance_boost,
                eur(hourly)
            ));
        }

        // Qualification, highest only
        let qualification_multiplier = modifiers.qualification_multiplier(input.qualification);
        if input.qualification != Qualification::None {
            let before = hourly;
            hourly *= qualification_multiplier;
            steps.push(format!(
                "{} qualification bonus ({}): {} × {:.2} = {}",
                input.qualification.label(),
                pct(qualification_multiplier),
                eur(before),
                qualification_multiplier,
                eur(hourly)
            ));
        }

        let unrounded_hourly = hourly;
        let hourly_rate = round_to_quarter(unrounded_hourly);
        steps.push(format!(
            "Rounded to nearest 0.25€: {} → {}",
            eur(unrounded_hourly),
            eur(hourly_rate)
        ));

        log::debug!(
            "Computed hourly rate {:.2} for age {} (seniority {}, qualification {})",
            hourly_rate,
            input.age,
            seniority.capped,
            input.qualification
        );

        Ok(RateResult {
            hourly_rate,
            steps,
            tier_rates: TierRates::from_hourly(hourly_rate, &self.assumptions),
            breakdown: RateBreakdown {
                seniority: seniority.years,
                capped_seniority: seniority.capped,
                hourly_index,
                base_hourly,
                seniority_bonus: bonus,
                status_multiplier: modifiers.status_multiplier(
                    input.is_ex_president,
                    input.is_intern,
                    input.is_member,
                ),
                balance_boost,
                qualification_multiplier,
                unrounded_hourly,
            },
        })
    }

    /// Compute a batch of inputs, failing on the first invalid record
    pub fn compute_batch(&self, inputs: &[CalculationInput]) -> Result<Vec<RateResult>> {
        inputs.iter().map(|input| self.compute(input)).collect()
    }
}

/// Compute one input against explicit assumptions
pub fn compute(input: &CalculationInput, assumptions: &RateAssumptions) -> Result<RateResult> {
    RateCalculator::new(*assumptions).compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::RateConstants;
    use crate::error::RateError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn calculator() -> RateCalculator {
        RateCalculator::default()
    }

    fn input(age: u32) -> CalculationInput {
        CalculationInput::new(age, &RateConstants::default())
    }

    #[test]
    fn test_scenario_age_30_no_modifiers() {
        let result = calculator().compute(&input(30)).unwrap();
        let b = &result.breakdown;

        assert_eq!(b.seniority, 7);
        assert_eq!(b.capped_seniority, 7);
        assert_abs_diff_eq!(b.base_hourly, 5.05, epsilon = 0.005);
        assert_relative_eq!(b.seniority_bonus, 7.097_941_072_602_9, epsilon = 1e-9);
        assert_relative_eq!(b.unrounded_hourly, 12.147_915_504_421_09, epsilon = 1e-9);
        assert_eq!(result.hourly_rate, 12.25);
    }

    #[test]
    fn test_scenario_capped_seniority_identical() {
        let calc = calculator();
        let at_43 = calc.compute(&input(43)).unwrap();
        let at_60 = calc.compute(&input(60)).unwrap();
        let at_70 = calc.compute(&input(70)).unwrap();

        assert_eq!(at_43.breakdown.seniority_bonus, at_60.breakdown.seniority_bonus);
        assert_eq!(at_43.breakdown.seniority_bonus, at_70.breakdown.seniority_bonus);
        assert_eq!(at_60.breakdown.capped_seniority, 20);
        assert_eq!(at_60.breakdown.seniority, 37);
        assert_eq!(at_43.hourly_rate, 16.5);
        assert_eq!(at_70.hourly_rate, 16.5);
    }

    #[test]
    fn test_scenario_intern_halves_unrounded() {
        let calc = calculator();
        let regular = calc.compute(&input(35)).unwrap();
        let intern = calc
            .compute(&CalculationInput { is_intern: true, ..input(35) })
            .unwrap();

        assert_relative_eq!(
            intern.breakdown.unrounded_hourly,
            regular.breakdown.unrounded_hourly * 0.5,
            epsilon = 1e-12
        );
        assert_eq!(calc.compute(&CalculationInput { is_intern: true, ..input(30) }).unwrap().hourly_rate, 6.0);
    }

    #[test]
    fn test_scenario_phd_beats_master() {
        let calc = calculator();
        let phd = calc
            .compute(&CalculationInput { qualification: Qualification::Phd, ..input(30) })
            .unwrap();
        let master = calc
            .compute(&CalculationInput { qualification: Qualification::Master, ..input(30) })
            .unwrap();

        let b = &phd.breakdown;
        assert_eq!(phd.hourly_rate, round_to_quarter((b.base_hourly + b.seniority_bonus) * 1.35));
        assert_eq!(phd.hourly_rate, 16.5);
        assert_eq!(master.hourly_rate, 14.5);
        assert!(master.hourly_rate < phd.hourly_rate);
    }

    #[test]
    fn test_status_multipliers_commute() {
        let calc = calculator();
        let both = calc
            .compute(&CalculationInput { is_ex_president: true, is_member: true, ..input(30) })
            .unwrap();
        let b = &both.breakdown;

        assert_relative_eq!(
            b.unrounded_hourly,
            (b.base_hourly + b.seniority_bonus) * 1.10 * 1.10,
            epsilon = 1e-12
        );
        assert_relative_eq!(b.status_multiplier, 1.21, epsilon = 1e-12);
        assert_eq!(both.hourly_rate, 14.75);
    }

    #[test]
    fn test_balance_boost_in_rate() {
        let calc = calculator();
        let half = calc.compute(&CalculationInput { balance: 5_000.0, ..input(30) }).unwrap();
        let saturated = calc.compute(&CalculationInput { balance: 20_000.0, ..input(30) }).unwrap();

        assert_eq!(half.breakdown.balance_boost, 0.25);
        assert_eq!(saturated.breakdown.balance_boost, 0.50);
        assert_eq!(half.hourly_rate, 15.25);
        assert_eq!(saturated.hourly_rate, 18.25);
    }

    #[test]
    fn test_all_modifiers_combined() {
        let result = calculator()
            .compute(&CalculationInput {
                is_ex_president: true,
                is_member: true,
                balance: 2_500.0,
                qualification: Qualification::Master,
                ..input(40)
            })
            .unwrap();

        assert_relative_eq!(result.breakdown.unrounded_hourly, 26.110_785_704_347_71, epsilon = 1e-9);
        assert_eq!(result.hourly_rate, 26.0);
    }

    #[test]
    fn test_rate_always_quarter_multiple() {
        let calc = calculator();
        for age in 18..=70 {
            for flags in 0..8u8 {
                for balance in [0.0, 1_234.5, 5_000.0, 17_000.0] {
                    for qualification in Qualification::ALL {
                        let input = CalculationInput {
                            is_ex_president: flags & 1 != 0,
                            is_intern: flags & 2 != 0,
                            is_member: flags & 4 != 0,
                            balance,
                            qualification,
                            ..input(age)
                        };
                        let rate = calc.compute(&input).unwrap().hourly_rate;
                        let scaled = rate * 4.0;
                        assert_abs_diff_eq!(scaled, scaled.round(), epsilon = 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn test_tier_rates_unrounded() {
        let result = calculator().compute(&input(30)).unwrap();
        let tiers = &result.tier_rates;

        assert_eq!(tiers.base, result.hourly_rate);
        assert_eq!(tiers.internal, tiers.base);
        assert_relative_eq!(tiers.commercial_strategic_vat, 12.25 * 1.5 * 0.75 * 1.23, epsilon = 1e-12);
    }

    #[test]
    fn test_steps_trace() {
        let plain = calculator().compute(&input(30)).unwrap();
        assert_eq!(plain.steps.len(), 6);
        assert_eq!(plain.steps[0], "Seniority: max(0, 30 - 23) = 7 years");
        assert_eq!(
            plain.steps[1],
            "Base hourly rate: (480.43€ ÷ 176) × 1.85 = 2.73€ × 1.85 = 5.05€"
        );
        assert!(plain.steps[3].starts_with("Seniority bonus: 7.10€"));
        assert!(plain.steps[3].contains("Mid-early career"));
        assert_eq!(plain.steps[5], "Rounded to nearest 0.25€: 12.15€ → 12.25€");

        let full = calculator()
            .compute(&CalculationInput {
                is_ex_president: true,
                is_intern: true,
                is_member: true,
                balance: 5_000.0,
                qualification: Qualification::Phd,
                ..input(60)
            })
            .unwrap();
        assert_eq!(full.steps.len(), 11);
        assert!(full.steps[0].ends_with("(capped at 20 years)"));
        assert!(full.steps[3].contains("Maximum seniority reached"));
        assert!(full.steps[5].starts_with("Ex Board Chair bonus (10%)"));
        assert!(full.steps[6].starts_with("Intern penalty (50%)"));
        assert!(full.steps[7].starts_with("Member bonus (10%)"));
        assert!(full.steps[8].starts_with("Balance bonus (25.00%)"));
        assert!(full.steps[9].starts_with("PhD qualification bonus (35%)"));
        assert!(full.steps[10].starts_with("Rounded to nearest 0.25€"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let calc = calculator();

        let err = calc.compute(&CalculationInput { ias: 0.0, ..input(30) }).unwrap_err();
        assert!(matches!(err, RateError::InvalidInput(_)));

        let err = calc.compute(&CalculationInput { ias: -480.43, ..input(30) }).unwrap_err();
        assert!(matches!(err, RateError::InvalidInput(_)));

        let err = calc.compute(&CalculationInput { balance: -0.01, ..input(30) }).unwrap_err();
        assert!(matches!(err, RateError::InvalidInput(_)));
    }

    #[test]
    fn test_invalid_assumptions_rejected() {
        let mut assumptions = RateAssumptions::default();
        assumptions.constants.hours_per_month_divisor = 0.0;

        let err = compute(&input(30), &assumptions).unwrap_err();
        assert!(matches!(err, RateError::InvalidAssumption { ref name, .. } if name == "hours_per_month_divisor"));

        let mut assumptions = RateAssumptions::default();
        assumptions.modifiers.balance_saturation = 0.0;
        let err = RateCalculator::new(assumptions).compute(&input(30)).unwrap_err();
        assert!(matches!(err, RateError::InvalidAssumption { .. }));
    }

    #[test]
    fn test_custom_ias_scales_rate() {
        let assumptions = RateAssumptions::default();
        let result = compute(&CalculationInput { ias: 960.86, ..input(23) }, &assumptions).unwrap();

        // Twice the default IAS doubles the base hourly
        assert_relative_eq!(result.breakdown.base_hourly, 2.0 * 5.049_974_431_818_18, epsilon = 1e-9);
        assert_eq!(result.hourly_rate, 10.0);
    }

    #[test]
    fn test_compute_batch() {
        let calc = calculator();
        let results = calc.compute_batch(&[input(23), input(30), input(43)]).unwrap();
        let rates: Vec<f64> = results.iter().map(|r| r.hourly_rate).collect();
        assert_eq!(rates, vec![5.0, 12.25, 16.5]);

        let bad = [input(30), CalculationInput { ias: 0.0, ..input(30) }];
        assert!(calc.compute_batch(&bad).is_err());
    }

    #[test]
    fn test_base_plus_seniority() {
        let assumptions = RateAssumptions::default();
        assert_eq!(base_plus_seniority(23, 480.43, &assumptions), 5.0);
        assert_eq!(base_plus_seniority(28, 480.43, &assumptions), 10.75);
        assert_eq!(base_plus_seniority(63, 480.43, &assumptions), 16.5);
    }

    #[test]
    fn test_round_to_quarter() {
        assert_eq!(round_to_quarter(12.147), 12.25);
        assert_eq!(round_to_quarter(12.12), 12.0);
        // Halfway between grid points rounds up
        assert_eq!(round_to_quarter(12.125), 12.25);
        assert_eq!(round_to_quarter(0.0), 0.0);
    }
}
