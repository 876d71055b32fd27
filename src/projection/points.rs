//! Output structures for projections

use crate::debt::DebtId;
use crate::strategy::Strategy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point of the debt/wealth time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// "Today" for the seed point, "Month N" afterwards
    pub label: String,

    /// Sum of all balances, floored at 0 and rounded to whole units
    pub total_debt: f64,

    /// Accumulated wealth, rounded to whole units
    pub wealth: f64,

    /// Month number (0 for the seed point)
    pub index: u32,
}

impl ProjectionPoint {
    /// The "Today" point before any simulated month
    pub fn seed(total_debt: f64) -> Self {
        Self::at(0, total_debt, 0.0)
    }

    pub fn at(index: u32, total_debt: f64, wealth: f64) -> Self {
        let label = if index == 0 {
            "Today".to_string()
        } else {
            format!("Month {}", index)
        };
        Self {
            label,
            total_debt: total_debt.max(0.0).round(),
            wealth: wealth.round(),
            index,
        }
    }
}

/// Detailed record of one simulated month (kept when `detailed_output` is on)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthLedger {
    pub month: u32,

    /// Interest added across all debts
    pub interest: f64,

    /// Paid in the minimum-payment pass
    pub minimums_paid: f64,

    /// Minimums that could not be covered by the budget
    pub shortfall: f64,

    /// Debt that received the surplus, if any
    pub extra_target: Option<DebtId>,

    /// Paid to `extra_target`
    pub extra_paid: f64,

    /// Added to wealth this month
    pub saved: f64,

    /// Budget left over while debt remained (not carried forward)
    pub unallocated: f64,

    /// Full-precision totals at end of month
    pub total_debt: f64,
    pub wealth: f64,

    /// Closing balance per debt, in input order
    pub balances: Vec<(DebtId, f64)>,
}

impl MonthLedger {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            interest: 0.0,
            minimums_paid: 0.0,
            shortfall: 0.0,
            extra_target: None,
            extra_paid: 0.0,
            saved: 0.0,
            unallocated: 0.0,
            total_debt: 0.0,
            wealth: 0.0,
            balances: Vec::new(),
        }
    }

    pub fn total_paid(&self) -> f64 {
        self.minimums_paid + self.extra_paid
    }

    pub fn is_degraded(&self) -> bool {
        self.shortfall > 0.0
    }

    /// Closing balance of one debt
    pub fn balance_of(&self, id: &str) -> Option<f64> {
        self.balances
            .iter()
            .find(|(debt_id, _)| debt_id.as_str() == id)
            .map(|(_, balance)| *balance)
    }
}

/// A debt reaching zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub id: DebtId,
    pub month: u32,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub strategy: Strategy,
    pub monthly_budget: f64,

    /// Seed point followed by one point per simulated month
    pub points: Vec<ProjectionPoint>,

    /// Index of the first point with zero debt, or the horizon cap
    pub debt_free_month_index: u32,

    /// `today` plus `debt_free_month_index` months
    pub debt_free_date: NaiveDate,

    /// Interest accrued over the simulated months
    pub total_interest: f64,

    /// Minimum and extra payments made over the simulated months
    pub total_paid: f64,

    /// Debts in the order they were paid off
    pub payoffs: Vec<DebtPayoff>,

    /// Months where minimums exceeded the budget
    pub degraded_months: Vec<u32>,

    /// Per-month detail; empty unless `detailed_output` is set
    pub ledger: Vec<MonthLedger>,
}

impl Projection {
    /// Whether debt reached zero within the simulated horizon
    pub fn is_debt_free(&self) -> bool {
        self.points.iter().any(|p| p.total_debt == 0.0)
    }

    pub fn months_to_freedom(&self) -> Option<u32> {
        self.is_debt_free().then_some(self.debt_free_month_index)
    }

    /// Month in which a given debt was paid off
    pub fn payoff_month(&self, id: &str) -> Option<u32> {
        self.payoffs
            .iter()
            .find(|p| p.id.as_str() == id)
            .map(|p| p.month)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            strategy: self.strategy,
            months_simulated: self.points.len().saturating_sub(1) as u32,
            months_to_freedom: self.months_to_freedom(),
            debt_free_date: self.debt_free_date,
            total_interest: self.total_interest,
            total_paid: self.total_paid,
            final_wealth: self.points.last().map(|p| p.wealth).unwrap_or(0.0),
            degraded_months: self.degraded_months.len() as u32,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub strategy: Strategy,
    pub months_simulated: u32,
    pub months_to_freedom: Option<u32>,
    pub debt_free_date: NaiveDate,
    pub total_interest: f64,
    pub total_paid: f64,
    pub final_wealth: f64,
    pub degraded_months: u32,
}
