//! Simulation state for a single projection run

use crate::debt::{Debt, DebtId};
use crate::strategy::{first_best, Strategy};

/// Working copy of one debt during a run
#[derive(Debug, Clone, PartialEq)]
pub struct DebtBalance {
    pub id: DebtId,

    /// Annual rate in percent (missing rates already folded to 0)
    pub annual_rate: f64,

    pub min_payment: f64,

    /// Remaining balance, full precision
    pub balance: f64,

    /// Month in which the balance reached zero
    pub paid_off_month: Option<u32>,
}

impl DebtBalance {
    fn from_debt(debt: &Debt) -> Self {
        Self {
            id: debt.id.clone(),
            annual_rate: debt.annual_rate(),
            min_payment: debt.min_payment,
            balance: debt.current_amount,
            paid_off_month: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.balance > 0.0
    }

    /// Interest for one month on the current balance
    pub fn monthly_interest(&self) -> f64 {
        if self.is_active() && self.annual_rate > 0.0 {
            self.balance * (self.annual_rate / 100.0) / 12.0
        } else {
            0.0
        }
    }
}

/// State of the household's debts at a point in time during projection
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current projection month (0 before the first step)
    pub month: u32,

    /// Per-debt balances in input order; only debts active at the start
    pub balances: Vec<DebtBalance>,

    /// Surplus redirected to savings once every debt is gone
    pub accumulated_wealth: f64,

    /// Interest accrued so far
    pub total_interest: f64,

    /// Minimum and extra payments made so far
    pub total_paid: f64,

    /// Month in which total debt first reached zero
    pub debt_free_since: Option<u32>,

    /// Months where the budget could not cover every minimum payment
    pub degraded_months: Vec<u32>,
}

impl SimulationState {
    /// Initialize state from a debt snapshot at projection start
    pub fn from_debts(debts: &[Debt]) -> Self {
        Self {
            month: 0,
            balances: debts
                .iter()
                .filter(|d| d.is_active())
                .map(DebtBalance::from_debt)
                .collect(),
            accumulated_wealth: 0.0,
            total_interest: 0.0,
            total_paid: 0.0,
            debt_free_since: None,
            degraded_months: Vec::new(),
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    pub fn total_debt(&self) -> f64 {
        self.balances.iter().map(|b| b.balance).sum()
    }

    pub fn has_debt(&self) -> bool {
        self.balances.iter().any(DebtBalance::is_active)
    }

    /// Index of the debt that receives this month's extra payment
    pub fn select_target(&self, strategy: Strategy) -> Option<usize> {
        let active = self
            .balances
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_active());

        let target = match strategy {
            Strategy::Avalanche => first_best(active, |(_, a), (_, b)| a.annual_rate > b.annual_rate),
            Strategy::Snowball => first_best(active, |(_, a), (_, b)| a.balance < b.balance),
        };

        target.map(|(idx, _)| idx)
    }

    /// Stamp the payoff month on debts that reached zero this month.
    ///
    /// Returns the ids in input order.
    pub fn record_payoffs(&mut self) -> Vec<DebtId> {
        let month = self.month;
        self.balances
            .iter_mut()
            .filter(|b| !b.is_active() && b.paid_off_month.is_none())
            .map(|b| {
                b.paid_off_month = Some(month);
                b.id.clone()
            })
            .collect()
    }
}
