//! Hourly Rate CLI
//!
//! Command-line interface for computing hourly rates and their derived series

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use hourly_rate::assumptions::loader::DEFAULT_ASSUMPTIONS_PATH;
use hourly_rate::{
    AgeRange, CalculationInput, Qualification, RateAssumptions, RateCalculator, ServiceOptions,
    ServiceType, SweepRunner,
};

#[derive(Debug, Parser)]
#[command(name = "hourly_rate", version, about = "IAS-indexed hourly rate calculator")]
struct Cli {
    /// CSV of `name,value` assumption overrides
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the hourly rate, its steps and service tiers
    Compute(ComputeArgs),
    /// Print the rate-by-age table and the seniority bonus curve
    Sweep(SweepArgs),
    /// Print the effective constants and modifiers
    Constants,
}

#[derive(Debug, Parser)]
struct ComputeArgs {
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(18..=70))]
    age: u32,

    /// Ex board chair
    #[arg(long)]
    ex_president: bool,

    #[arg(long)]
    intern: bool,

    #[arg(long)]
    member: bool,

    #[arg(long, default_value_t = 0.0)]
    balance: f64,

    /// none, bachelor, master or phd; repeat for several, the highest applies
    #[arg(long)]
    qualification: Vec<Qualification>,

    /// IAS override (defaults to the configured IAS)
    #[arg(long)]
    ias: Option<f64>,

    #[arg(long, value_enum, default_value_t = ServiceArg::Internal)]
    service: ServiceArg,

    /// Strategic commercial service (-25% of commercial)
    #[arg(long)]
    strategic: bool,

    /// Leave VAT out of the commercial value
    #[arg(long)]
    no_vat: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser)]
struct SweepArgs {
    #[arg(long)]
    ias: Option<f64>,

    #[arg(long, default_value_t = 23)]
    start_age: u32,

    #[arg(long, default_value_t = 65)]
    end_age: u32,

    #[arg(long, default_value_t = 5)]
    step: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServiceArg {
    Internal,
    Commercial,
}

impl From<ServiceArg> for ServiceType {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::Internal => ServiceType::Internal,
            ServiceArg::Commercial => ServiceType::Commercial,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = match &cli.assumptions {
        Some(path) => RateAssumptions::from_csv_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None if Path::new(DEFAULT_ASSUMPTIONS_PATH).exists() => RateAssumptions::from_csv()
            .with_context(|| format!("loading assumptions from {DEFAULT_ASSUMPTIONS_PATH}"))?,
        None => RateAssumptions::default(),
    };

    match cli.command {
        Command::Compute(args) => run_compute(&assumptions, &args),
        Command::Sweep(args) => run_sweep(&assumptions, &args),
        Command::Constants => {
            print_constants(&assumptions);
            Ok(())
        }
    }
}

fn run_compute(assumptions: &RateAssumptions, args: &ComputeArgs) -> anyhow::Result<()> {
    let input = CalculationInput {
        age: args.age,
        is_ex_president: args.ex_president,
        is_intern: args.intern,
        is_member: args.member,
        balance: args.balance,
        qualification: Qualification::highest(args.qualification.iter().copied()),
        ias: args.ias.unwrap_or(assumptions.constants.ias),
    };

    let calculator = RateCalculator::new(*assumptions);
    let result = calculator.compute(&input).context("computing hourly rate")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Hourly Rate Calculator");
    println!("======================\n");
    println!("{:.2}€ per hour\n", result.hourly_rate);

    println!("Calculation Steps:");
    for (idx, step) in result.steps.iter().enumerate() {
        println!("{:>3}. {}", idx + 1, step);
    }

    let tiers = &result.tier_rates;
    println!("\nService Tiers:");
    println!("  {:<28} {:>10.2}€", "Internal", tiers.internal);
    println!("  {:<28} {:>10.2}€", "Commercial", tiers.commercial);
    println!("  {:<28} {:>10.2}€", "Commercial + VAT", tiers.commercial_vat);
    println!("  {:<28} {:>10.2}€", "Commercial strategic", tiers.commercial_strategic);
    println!("  {:<28} {:>10.2}€", "Commercial strategic + VAT", tiers.commercial_strategic_vat);

    let options = match ServiceType::from(args.service) {
        ServiceType::Internal => ServiceOptions::internal(),
        ServiceType::Commercial => ServiceOptions::commercial()
            .strategic(args.strategic)
            .with_vat(!args.no_vat),
    };
    let (min, max) = tiers.range();
    println!("\nFinal Value ({:?}):", options.service_type);
    if options.charges_vat() {
        println!("  {:.2}€ (with VAT)", tiers.select(&options));
    } else {
        println!("  {:.2}€", tiers.select(&options));
    }
    println!("  Range: {:.2}€ (internal) .. {:.2}€ (commercial + VAT)", min, max);

    Ok(())
}

fn run_sweep(assumptions: &RateAssumptions, args: &SweepArgs) -> anyhow::Result<()> {
    let runner = match args.ias {
        Some(ias) => SweepRunner::with_ias(*assumptions, ias)?,
        None => SweepRunner::new(*assumptions)?,
    };
    let range = AgeRange {
        start: args.start_age,
        end: args.end_age,
        step: args.step,
    };

    println!("Hourly Rate By Age (base calculation, no bonuses)");
    println!("{:>5} {:>10}", "Age", "Hourly");
    println!("{}", "-".repeat(26));
    for point in runner.age_sweep(range) {
        let note = if point.capped { " (capped)" } else { "" };
        println!("{:>5} {:>9.2}€{}", point.age, point.hourly, note);
    }

    println!(
        "\nSeniority Bonus Growth Curve (capped at {} years, age {})",
        assumptions.constants.max_seniority,
        assumptions.constants.capping_age()
    );
    println!("{:>5} {:>10}", "Years", "Bonus");
    println!("{}", "-".repeat(26));
    for point in runner.default_seniority_curve() {
        let note = if point.beyond_cap { " (cap)" } else { "" };
        println!("{:>5} {:>9.2}€{}", point.seniority, point.bonus, note);
    }

    Ok(())
}

fn print_constants(assumptions: &RateAssumptions) {
    let c = &assumptions.constants;
    let m = &assumptions.modifiers;

    println!("Constants:");
    println!("  IAS:                  {:.2}€", c.ias);
    println!("  IASH:                 {:.2}€ (IAS ÷ {})", c.hourly_index(c.ias), c.hours_per_month_divisor);
    println!("  Base hourly factor:   {}", c.base_hourly_factor);
    println!("  Base hourly:          {:.2}€", c.base_hourly(c.ias));
    println!("  Seniority start age:  {}", c.seniority_start_age);
    println!("  Max seniority:        {} years", c.max_seniority);
    println!("  VAT rate:             {:.0}%", c.vat_rate * 100.0);

    println!("\nModifiers:");
    println!("  Ex Board Chair:       × {:.2}", m.ex_president);
    println!("  Intern:               × {:.2}", m.intern);
    println!("  Member:               × {:.2}", m.member);
    println!(
        "  Balance:              + min({:.0}%, balance / {} × {:.0}%)",
        m.balance_boost_cap * 100.0,
        m.balance_saturation,
        m.balance_boost_cap * 100.0
    );
    println!("  PhD:                  × {:.2}", m.phd);
    println!("  Master's:             × {:.2}", m.master);
    println!("  Bachelor's:           × {:.2}", m.bachelor);
    println!("  Commercial markup:    × {:.2}", m.commercial_markup);
    println!("  Strategic factor:     × {:.2}", m.strategic_factor);
}
