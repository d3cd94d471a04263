//! Load batches of calculation inputs from CSV
//!
//! Columns: age, ex_president, intern, member, balance, qualification and an
//! optional ias (falls back to the configured IAS when missing or empty).

use std::io::Read;
use std::path::Path;

use csv::Reader;

use super::{CalculationInput, Qualification};
use crate::assumptions::RateConstants;
use crate::error::Result;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    age: u32,
    #[serde(default)]
    ex_president: bool,
    #[serde(default)]
    intern: bool,
    #[serde(default)]
    member: bool,
    #[serde(default)]
    balance: f64,
    #[serde(default)]
    qualification: String,
    #[serde(default)]
    ias: Option<f64>,
}

impl CsvRow {
    fn to_input(self, constants: &RateConstants) -> Result<CalculationInput> {
        let qualification: Qualification = self.qualification.parse()?;

        let input = CalculationInput {
            age: self.age,
            is_ex_president: self.ex_president,
            is_intern: self.intern,
            is_member: self.member,
            balance: self.balance,
            qualification,
            ias: self.ias.unwrap_or(constants.ias),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Load all inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P, constants: &RateConstants) -> Result<Vec<CalculationInput>> {
    let path = path.as_ref();
    let inputs = load_inputs_from_reader(std::fs::File::open(path)?, constants)?;
    log::info!("Loaded {} inputs from {}", inputs.len(), path.display());
    Ok(inputs)
}

/// Load inputs from any reader (e.g., string buffer, stdin)
pub fn load_inputs_from_reader<R: Read>(reader: R, constants: &RateConstants) -> Result<Vec<CalculationInput>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.to_input(constants)?);
    }

    Ok(inputs)
}
