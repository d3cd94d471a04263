//! Rate calculator: a pure mapping from an input record to an hourly rate

mod engine;
mod result;
pub mod seniority;

pub use engine::{base_plus_seniority, compute, round_to_quarter, RateCalculator};
pub use result::{RateBreakdown, RateResult, ServiceOptions, ServiceType, TierRates};
pub use seniority::{growth_factor, seniority_bonus, CareerStage, GrowthComponents, Seniority};
