//! Load debts from a CSV debt list

use super::{validate_debts, Debt, DebtId};
use crate::error::Result;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Raw CSV row matching the debt list columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    initial_amount: f64,
    current_amount: f64,
    #[serde(default)]
    interest_rate: Option<f64>,
    min_payment: f64,
    #[serde(default)]
    color: Option<String>,
}

impl CsvRow {
    fn into_debt(self) -> Debt {
        Debt {
            id: DebtId::new(self.id),
            name: self.name,
            initial_amount: self.initial_amount,
            current_amount: self.current_amount,
            interest_rate: self.interest_rate,
            min_payment: self.min_payment,
            color: self.color.filter(|c| !c.is_empty()),
        }
    }
}

/// Load and validate all debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>> {
    let file = std::fs::File::open(path)?;
    load_debts_from_reader(file)
}

/// Load and validate debts from any reader (e.g., string buffer, request body)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Debt>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut debts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(row.into_debt());
    }

    validate_debts(&debts)?;
    log::debug!("loaded {} debts", debts.len());

    Ok(debts)
}
