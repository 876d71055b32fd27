//! Debt data structures matching the household debt list format

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a debt, unique within one debt set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(String);

impl DebtId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DebtId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single debt owned by the household
///
/// The engine only ever reads a `Debt`; all simulation happens on a private
/// copy of `current_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique identifier within the set
    pub id: DebtId,

    /// Display name, used in advisor reasons
    pub name: String,

    /// Original principal
    pub initial_amount: f64,

    /// Outstanding balance
    pub current_amount: f64,

    /// Nominal annual rate in percent (e.g. 24.5 for 24.5%)
    #[serde(default)]
    pub interest_rate: Option<f64>,

    /// Contractual minimum monthly payment
    pub min_payment: f64,

    /// Presentation-only; ignored by the engine
    #[serde(default)]
    pub color: Option<String>,
}

impl Debt {
    /// Create a debt whose current balance equals its original principal
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        interest_rate: f64,
        min_payment: f64,
    ) -> Self {
        Self {
            id: DebtId::new(id),
            name: name.into(),
            initial_amount: amount,
            current_amount: amount,
            interest_rate: Some(interest_rate),
            min_payment,
            color: None,
        }
    }

    /// Set the outstanding balance, keeping the original principal
    pub fn with_current_amount(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Annual rate in percent, missing treated as zero
    pub fn annual_rate(&self) -> f64 {
        self.interest_rate.unwrap_or(0.0)
    }

    /// Monthly rate as a decimal fraction
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate() / 100.0 / 12.0
    }

    /// Whether the debt still has an outstanding balance
    pub fn is_active(&self) -> bool {
        self.current_amount > 0.0
    }

    /// Share of the original principal already repaid, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.initial_amount <= 0.0 {
            1.0
        } else {
            (1.0 - self.current_amount / self.initial_amount).clamp(0.0, 1.0)
        }
    }

    /// Reject negative or non-finite amounts and empty ids
    pub fn validate(&self) -> Result<(), InputError> {
        if self.id.as_str().trim().is_empty() {
            return Err(InputError::EmptyId);
        }

        let mut fields = vec![
            ("initial_amount", self.initial_amount),
            ("current_amount", self.current_amount),
            ("min_payment", self.min_payment),
        ];
        if let Some(rate) = self.interest_rate {
            fields.push(("interest_rate", rate));
        }

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InputError::NonFinite {
                    id: self.id.clone(),
                    field,
                });
            }
            if value < 0.0 {
                return Err(InputError::NegativeAmount {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Validate every debt and check ids are unique
pub fn validate_debts(debts: &[Debt]) -> Result<(), InputError> {
    let mut seen = HashSet::with_capacity(debts.len());
    for debt in debts {
        debt.validate()?;
        if !seen.insert(&debt.id) {
            return Err(InputError::DuplicateId(debt.id.clone()));
        }
    }
    Ok(())
}
