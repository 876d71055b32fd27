//! Debt records and CSV loading

mod data;
pub mod loader;

pub use data::{validate_debts, Debt, DebtId};
pub use loader::{load_debts, load_debts_from_reader};
