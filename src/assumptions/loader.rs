//! CSV-based assumption loader
//!
//! Reads `name,value` rows and overrides the matching constant or modifier.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::RateAssumptions;
use crate::error::{RateError, Result};

/// Default path to the assumptions override file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/rate_assumptions.csv";

/// Load overrides from a CSV file on top of the defaults
pub fn load_assumptions(path: &Path) -> Result<RateAssumptions> {
    let file = File::open(path)?;
    let assumptions = load_assumptions_from_reader(file)?;
    log::info!("Loaded rate assumptions from {}", path.display());
    Ok(assumptions)
}

/// Load overrides from any reader (e.g., string buffer)
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<RateAssumptions> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut assumptions = RateAssumptions::default();

    for result in csv_reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default();
        let raw = record
            .get(1)
            .ok_or_else(|| RateError::invalid_assumption(name, "missing value"))?;
        apply_override(&mut assumptions, name, raw)?;
        log::debug!("Assumption override {} = {}", name, raw);
    }

    assumptions.validate()?;
    Ok(assumptions)
}

fn apply_override(assumptions: &mut RateAssumptions, name: &str, raw: &str) -> Result<()> {
    let constants = &mut assumptions.constants;
    let modifiers = &mut assumptions.modifiers;

    match name {
        "ias" => constants.ias = parse_f64(name, raw)?,
        "hours_per_month_divisor" => constants.hours_per_month_divisor = parse_f64(name, raw)?,
        "base_hourly_factor" => constants.base_hourly_factor = parse_f64(name, raw)?,
        "max_seniority" => constants.max_seniority = parse_u32(name, raw)?,
        "vat_rate" => constants.vat_rate = parse_f64(name, raw)?,
        "seniority_start_age" => constants.seniority_start_age = parse_u32(name, raw)?,
        "ex_president" => modifiers.ex_president = parse_f64(name, raw)?,
        "intern" => modifiers.intern = parse_f64(name, raw)?,
        "member" => modifiers.member = parse_f64(name, raw)?,
        "balance_boost_cap" => modifiers.balance_boost_cap = parse_f64(name, raw)?,
        "balance_saturation" => modifiers.balance_saturation = parse_f64(name, raw)?,
        "phd" => modifiers.phd = parse_f64(name, raw)?,
        "master" => modifiers.master = parse_f64(name, raw)?,
        "bachelor" => modifiers.bachelor = parse_f64(name, raw)?,
        "commercial_markup" => modifiers.commercial_markup = parse_f64(name, raw)?,
        "strategic_factor" => modifiers.strategic_factor = parse_f64(name, raw)?,
        other => return Err(RateError::invalid_assumption(other, "unknown assumption name")),
    }
    Ok(())
}

fn parse_f64(name: &str, raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| RateError::invalid_assumption(name, format!("not a number: {raw:?}")))
}

fn parse_u32(name: &str, raw: &str) -> Result<u32> {
    raw.parse()
        .map_err(|_| RateError::invalid_assumption(name, format!("not a whole number: {raw:?}")))
}
