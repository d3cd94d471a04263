//! Compute hourly rates for every row of an input CSV
//!
//! Outputs one row per input with the rounded rate and all service tiers

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use hourly_rate::input::load_inputs;
use hourly_rate::{CalculationInput, RateAssumptions, RateCalculator, RateResult};

#[derive(Debug, Parser)]
#[command(name = "rate_batch", version, about = "Compute hourly rates for a CSV of inputs")]
struct Args {
    /// Input CSV (age, ex_president, intern, member, balance, qualification[, ias])
    #[arg(short, long, default_value = "data/sample_inputs.csv")]
    input: PathBuf,

    /// Output CSV
    #[arg(short, long, default_value = "rate_output.csv")]
    output: PathBuf,

    /// CSV of `name,value` assumption overrides
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// One output row: the input echoed back plus the computed rates
#[derive(Debug, Serialize)]
struct OutputRow {
    age: u32,
    ex_president: bool,
    intern: bool,
    member: bool,
    balance: f64,
    qualification: String,
    ias: f64,
    seniority: u32,
    unrounded_hourly: f64,
    hourly_rate: f64,
    internal: f64,
    commercial: f64,
    commercial_strategic: f64,
    commercial_vat: f64,
    commercial_strategic_vat: f64,
}

impl OutputRow {
    fn new(input: &CalculationInput, result: &RateResult) -> Self {
        let tiers = &result.tier_rates;
        Self {
            age: input.age,
            ex_president: input.is_ex_president,
            intern: input.is_intern,
            member: input.is_member,
            balance: input.balance,
            qualification: input.qualification.to_string(),
            ias: input.ias,
            seniority: result.breakdown.capped_seniority,
            unrounded_hourly: result.breakdown.unrounded_hourly,
            hourly_rate: result.hourly_rate,
            internal: tiers.internal,
            commercial: tiers.commercial,
            commercial_strategic: tiers.commercial_strategic,
            commercial_vat: tiers.commercial_vat,
            commercial_strategic_vat: tiers.commercial_strategic_vat,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let assumptions = match &args.assumptions {
        Some(path) => RateAssumptions::from_csv_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => RateAssumptions::default(),
    };

    println!("Loading inputs from {}...", args.input.display());
    let inputs = load_inputs(&args.input, &assumptions.constants)
        .with_context(|| format!("loading inputs from {}", args.input.display()))?;
    println!("Loaded {} inputs in {:?}", inputs.len(), start.elapsed());

    let calculator = RateCalculator::new(assumptions);
    let results = calculator.compute_batch(&inputs)?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for (input, result) in inputs.iter().zip(&results) {
        writer.serialize(OutputRow::new(input, result))?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    if !results.is_empty() {
        let total: f64 = results.iter().map(|r| r.hourly_rate).sum();
        let min = results.iter().map(|r| r.hourly_rate).fold(f64::INFINITY, f64::min);
        let max = results.iter().map(|r| r.hourly_rate).fold(f64::NEG_INFINITY, f64::max);
        println!("\nBatch Summary:");
        println!("  Rows:    {}", results.len());
        println!("  Mean:    {:.2}€", total / results.len() as f64);
        println!("  Min:     {:.2}€", min);
        println!("  Max:     {:.2}€", max);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
