//! Error types shared by the advisor, the engine and the loaders

use crate::debt::DebtId;
use thiserror::Error;

/// Input rejected before any simulation starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("debt has an empty id")]
    EmptyId,

    #[error("debt id '{0}' appears more than once")]
    DuplicateId(DebtId),

    #[error("debt '{id}' has negative {field}: {value}")]
    NegativeAmount {
        id: DebtId,
        field: &'static str,
        value: f64,
    },

    #[error("debt '{id}' has a non-finite {field}")]
    NonFinite { id: DebtId, field: &'static str },

    #[error("monthly budget must be a finite non-negative amount, got {0}")]
    InvalidBudget(f64),

    #[error("budget item '{label}' must be a finite non-negative amount, got {amount}")]
    InvalidBudgetItem { label: String, amount: f64 },
}

/// Top-level error for library operations
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("debt-free date is out of range ({months} months from today)")]
    DateOutOfRange { months: u32 },

    #[error("unknown strategy '{0}' (expected 'avalanche' or 'snowball')")]
    UnknownStrategy(String),

    #[error("unknown budget item kind '{0}' (expected 'income' or 'expense')")]
    UnknownBudgetKind(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
