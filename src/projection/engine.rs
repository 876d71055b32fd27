//! Core projection engine for monthly debt repayment projections

use super::points::{DebtPayoff, MonthLedger, Projection, ProjectionPoint};
use super::state::SimulationState;
use crate::debt::{validate_debts, Debt};
use crate::error::{InputError, PlannerError, Result};
use crate::strategy::Strategy;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default hard stop on simulated months
pub const DEFAULT_HORIZON_CAP: u32 = 60;

/// Default minimum number of simulated months, so the wealth trend is visible
pub const DEFAULT_MIN_EXTRA_MONTHS: u32 = 12;

fn default_horizon_cap() -> u32 { DEFAULT_HORIZON_CAP }
fn default_min_extra_months() -> u32 { DEFAULT_MIN_EXTRA_MONTHS }

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Maximum number of months to simulate
    #[serde(default = "default_horizon_cap")]
    pub horizon_cap: u32,

    /// Keep simulating at least this many months even once debt is gone
    #[serde(default = "default_min_extra_months")]
    pub min_extra_months: u32,

    /// Whether to keep the per-month ledger
    #[serde(default)]
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_cap: DEFAULT_HORIZON_CAP,
            min_extra_months: DEFAULT_MIN_EXTRA_MONTHS,
            detailed_output: false,
        }
    }
}

impl ProjectionConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for one debt set.
    ///
    /// `today` only feeds `debt_free_date`; identical inputs always produce
    /// identical projections.
    pub fn project(
        &self,
        debts: &[Debt],
        monthly_budget: f64,
        strategy: Strategy,
        today: NaiveDate,
    ) -> Result<Projection> {
        validate_debts(debts)?;
        if !monthly_budget.is_finite() || monthly_budget < 0.0 {
            return Err(InputError::InvalidBudget(monthly_budget).into());
        }

        let mut state = SimulationState::from_debts(debts);
        let mut points = vec![ProjectionPoint::seed(state.total_debt())];
        let mut payoffs = Vec::new();
        let mut ledger = Vec::new();

        log::debug!(
            "projecting {} active debts, budget {:.2}, strategy {}",
            state.balances.len(),
            monthly_budget,
            strategy
        );

        if state.has_debt() {
            while self.should_continue(&state) {
                // Advance state to next month
                state.advance_month();

                let row = self.calculate_month(&mut state, monthly_budget, strategy);

                payoffs.extend(state.record_payoffs().into_iter().map(|id| DebtPayoff {
                    id,
                    month: state.month,
                }));
                points.push(ProjectionPoint::at(state.month, row.total_debt, row.wealth));

                if self.config.detailed_output {
                    ledger.push(row);
                }
            }
        }

        let debt_free_month_index = points
            .iter()
            .find(|p| p.total_debt == 0.0)
            .map(|p| p.index)
            .unwrap_or(self.config.horizon_cap);

        let debt_free_date = today
            .checked_add_months(Months::new(debt_free_month_index))
            .ok_or(PlannerError::DateOutOfRange {
                months: debt_free_month_index,
            })?;

        log::debug!(
            "{} projection: {} months simulated, debt-free index {}",
            strategy,
            state.month,
            debt_free_month_index
        );

        Ok(Projection {
            strategy,
            monthly_budget,
            points,
            debt_free_month_index,
            debt_free_date,
            total_interest: state.total_interest,
            total_paid: state.total_paid,
            payoffs,
            degraded_months: state.degraded_months,
            ledger,
        })
    }

    /// Keep going while debt remains or the minimum run length is not reached,
    /// plus one month after payoff so at least one wealth step is shown
    fn should_continue(&self, state: &SimulationState) -> bool {
        if state.month >= self.config.horizon_cap {
            return false;
        }
        state.has_debt()
            || state.month < self.config.min_extra_months
            || state.debt_free_since == Some(state.month)
    }

    /// Simulate a single month
    fn calculate_month(
        &self,
        state: &mut SimulationState,
        monthly_budget: f64,
        strategy: Strategy,
    ) -> MonthLedger {
        let mut row = MonthLedger::new(state.month);
        let mut remaining = monthly_budget;

        self.accrue_interest(state, &mut row);
        self.pay_minimums(state, &mut row, &mut remaining);
        self.pay_extra(state, &mut row, &mut remaining, strategy);

        let total_debt = state.total_debt();
        if total_debt <= 0.0 {
            if remaining > 0.0 {
                // Debts cleared mid-month; the rest of the budget is saved
                state.accumulated_wealth += remaining;
                row.saved += remaining;
                remaining = 0.0;
            }
            if state.debt_free_since.is_none() {
                state.debt_free_since = Some(state.month);
            }
        }

        state.total_paid += row.total_paid();

        row.unallocated = remaining;
        row.total_debt = total_debt;
        row.wealth = state.accumulated_wealth;
        if self.config.detailed_output {
            row.balances = state
                .balances
                .iter()
                .map(|b| (b.id.clone(), b.balance))
                .collect();
        }

        row
    }

    /// Interest on the pre-payment balance of every active debt
    fn accrue_interest(&self, state: &mut SimulationState, row: &mut MonthLedger) {
        for debt in state.balances.iter_mut() {
            let interest = debt.monthly_interest();
            debt.balance += interest;
            row.interest += interest;
        }
        state.total_interest += row.interest;
    }

    /// Minimums in input order, never paying more than the budget left.
    /// Debts later in the order absorb any shortfall.
    fn pay_minimums(&self, state: &mut SimulationState, row: &mut MonthLedger, remaining: &mut f64) {
        for debt in state.balances.iter_mut().filter(|b| b.is_active()) {
            let due = debt.balance.min(debt.min_payment);
            let paid = due.min(*remaining);

            debt.balance -= paid;
            *remaining -= paid;
            row.minimums_paid += paid;
            row.shortfall += due - paid;
        }

        if row.is_degraded() {
            if state.degraded_months.is_empty() {
                log::warn!(
                    "month {}: budget does not cover minimum payments (short by {:.2})",
                    state.month,
                    row.shortfall
                );
            }
            state.degraded_months.push(state.month);
        }
    }

    /// Whole surplus to a single target, or to wealth when nothing is owed
    fn pay_extra(
        &self,
        state: &mut SimulationState,
        row: &mut MonthLedger,
        remaining: &mut f64,
        strategy: Strategy,
    ) {
        if *remaining <= 0.0 {
            return;
        }

        match state.select_target(strategy) {
            Some(idx) => {
                let target = &mut state.balances[idx];
                let paid = target.balance.min(*remaining);

                target.balance -= paid;
                *remaining -= paid;
                row.extra_paid = paid;
                row.extra_target = Some(target.id.clone());
            }
            None => {
                state.accumulated_wealth += *remaining;
                row.saved += *remaining;
                *remaining = 0.0;
            }
        }
    }
}

/// Run a projection with the default configuration
pub fn project(
    debts: &[Debt],
    monthly_budget: f64,
    strategy: Strategy,
    today: NaiveDate,
) -> Result<Projection> {
    ProjectionEngine::default().project(debts, monthly_budget, strategy, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn detailed_engine() -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            detailed_output: true,
            ..Default::default()
        })
    }

    fn two_debts() -> Vec<Debt> {
        vec![
            Debt::new("a", "A", 1_000.0, 60.0, 100.0),
            Debt::new("b", "B", 5_000.0, 10.0, 100.0),
        ]
    }

    #[test]
    fn test_single_zero_rate_debt() {
        let debts = vec![Debt::new("loan", "Loan", 12_000.0, 0.0, 500.0)];
        let result = project(&debts, 1_000.0, Strategy::Avalanche, today()).unwrap();

        assert_eq!(result.debt_free_month_index, 12);
        assert_eq!(result.points[0].label, "Today");
        assert_eq!(result.points[0].total_debt, 12_000.0);
        assert_eq!(result.points[1].total_debt, 11_000.0);
        assert_eq!(result.points[12].total_debt, 0.0);
        assert_eq!(result.points[12].wealth, 0.0);
        assert_eq!(result.points[13].wealth, 1_000.0);
        assert_eq!(result.points.len(), 14);
        assert_eq!(result.debt_free_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(result.payoff_month("loan"), Some(12));
        assert_relative_eq!(result.total_paid, 12_000.0);
    }

    #[test]
    fn test_avalanche_month_one() {
        let result = detailed_engine()
            .project(&two_debts(), 400.0, Strategy::Avalanche, today())
            .unwrap();
        let month1 = &result.ledger[0];

        // A: 1000 + 50 interest - 100 min - 200 extra
        assert_relative_eq!(month1.interest, 50.0 + 5_000.0 * 0.10 / 12.0);
        assert_eq!(month1.extra_target.as_ref().map(|id| id.as_str()), Some("a"));
        assert_relative_eq!(month1.extra_paid, 200.0);
        assert_relative_eq!(month1.balance_of("a").unwrap(), 750.0);
        assert_relative_eq!(month1.balance_of("b").unwrap(), 5_000.0 + 5_000.0 * 0.10 / 12.0 - 100.0);
        assert_eq!(month1.unallocated, 0.0);
    }

    #[test]
    fn test_snowball_prefers_smaller_balance_over_rate() {
        let debts = vec![
            Debt::new("a", "A", 1_000.0, 60.0, 100.0),
            Debt::new("b", "B", 500.0, 10.0, 100.0),
        ];
        let result = detailed_engine()
            .project(&debts, 400.0, Strategy::Snowball, today())
            .unwrap();
        let month1 = &result.ledger[0];

        assert_eq!(month1.extra_target.as_ref().map(|id| id.as_str()), Some("b"));
        assert_relative_eq!(month1.balance_of("a").unwrap(), 950.0);
        assert_relative_eq!(month1.extra_paid, 200.0);
    }

    #[test]
    fn test_extra_not_spread_across_debts() {
        // Target needs only 10 of the 300 surplus; the rest stays unallocated
        let debts = vec![
            Debt::new("tiny", "Tiny", 10.0, 0.0, 0.0),
            Debt::new("big", "Big", 5_000.0, 0.0, 0.0),
        ];
        let result = detailed_engine()
            .project(&debts, 300.0, Strategy::Snowball, today())
            .unwrap();
        let month1 = &result.ledger[0];

        assert_relative_eq!(month1.extra_paid, 10.0);
        assert_relative_eq!(month1.balance_of("big").unwrap(), 5_000.0);
        assert_relative_eq!(month1.unallocated, 290.0);
        assert_eq!(month1.saved, 0.0);
    }

    #[test]
    fn test_degraded_budget_first_come_first_served() {
        let debts = vec![
            Debt::new("first", "First", 2_000.0, 0.0, 150.0),
            Debt::new("second", "Second", 2_000.0, 12.0, 150.0),
        ];
        let result = detailed_engine()
            .project(&debts, 200.0, Strategy::Avalanche, today())
            .unwrap();
        let month1 = &result.ledger[0];

        assert_relative_eq!(month1.balance_of("first").unwrap(), 1_850.0);
        // Second gets the remaining 50 after its 20 of interest
        assert_relative_eq!(month1.balance_of("second").unwrap(), 2_000.0 + 20.0 - 50.0);
        assert_relative_eq!(month1.shortfall, 100.0);
        assert_eq!(month1.extra_paid, 0.0);
        assert_eq!(result.degraded_months.first(), Some(&1));
    }

    #[test]
    fn test_zero_budget_hits_horizon() {
        let debts = vec![Debt::new("card", "Card", 1_000.0, 20.0, 50.0)];
        let result = project(&debts, 0.0, Strategy::Avalanche, today()).unwrap();

        assert_eq!(result.points.len(), 61);
        assert_eq!(result.debt_free_month_index, 60);
        assert!(!result.is_debt_free());
        assert_eq!(result.months_to_freedom(), None);
        assert_eq!(result.degraded_months.len(), 60);
        // Balance compounds monthly
        let expected = 1_000.0 * (1.0 + 0.20 / 12.0_f64).powi(60);
        assert_abs_diff_eq!(result.points[60].total_debt, expected.round());
    }

    #[test]
    fn test_no_active_debts_seed_only() {
        let debts = vec![Debt::new("old", "Old", 500.0, 10.0, 50.0).with_current_amount(0.0)];
        let result = project(&debts, 800.0, Strategy::Snowball, today()).unwrap();

        assert_eq!(result.points.len(), 1);
        assert_eq!(result.points[0].total_debt, 0.0);
        assert_eq!(result.debt_free_month_index, 0);
        assert_eq!(result.debt_free_date, today());

        let empty = project(&[], 800.0, Strategy::Snowball, today()).unwrap();
        assert_eq!(empty.points.len(), 1);
    }

    #[test]
    fn test_minimum_run_length_for_wealth_trend() {
        let debts = vec![Debt::new("small", "Small", 300.0, 0.0, 100.0)];
        let result = project(&debts, 500.0, Strategy::Snowball, today()).unwrap();

        assert_eq!(result.debt_free_month_index, 1);
        assert_eq!(result.points.len(), 13);
        assert_eq!(result.points[1].wealth, 200.0);
        assert_eq!(result.points[12].wealth, 200.0 + 11.0 * 500.0);
    }

    #[test]
    fn test_custom_horizon() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            horizon_cap: 6,
            min_extra_months: 3,
            detailed_output: false,
        });
        let debts = vec![Debt::new("card", "Card", 10_000.0, 15.0, 200.0)];
        let result = engine.project(&debts, 300.0, Strategy::Avalanche, today()).unwrap();

        assert_eq!(result.points.len(), 7);
        assert_eq!(result.debt_free_month_index, 6);
        assert!(result.ledger.is_empty());
    }

    #[test]
    fn test_negative_budget_rejected() {
        let err = project(&two_debts(), -1.0, Strategy::Avalanche, today()).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidInput(InputError::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_invalid_debt_rejected() {
        let debts = vec![Debt::new("card", "Card", 1_000.0, 18.0, -20.0)];
        assert!(matches!(
            project(&debts, 500.0, Strategy::Avalanche, today()),
            Err(PlannerError::InvalidInput(InputError::NegativeAmount { .. }))
        ));
    }

    #[test]
    fn test_payoff_order() {
        let debts = vec![
            Debt::new("big", "Big", 3_000.0, 5.0, 50.0),
            Debt::new("small", "Small", 400.0, 5.0, 50.0),
        ];
        let result = project(&debts, 600.0, Strategy::Snowball, today()).unwrap();

        let order: Vec<_> = result.payoffs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["small", "big"]);
        assert!(result.payoff_month("small").unwrap() < result.payoff_month("big").unwrap());
    }

    #[test]
    fn test_summary() {
        let debts = vec![Debt::new("loan", "Loan", 12_000.0, 0.0, 500.0)];
        let summary = project(&debts, 1_000.0, Strategy::Avalanche, today())
            .unwrap()
            .summary();

        assert_eq!(summary.months_simulated, 13);
        assert_eq!(summary.months_to_freedom, Some(12));
        assert_eq!(summary.total_interest, 0.0);
        assert_eq!(summary.final_wealth, 1_000.0);
        assert_eq!(summary.degraded_months, 0);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: ProjectionConfig = serde_json::from_str(r#"{ "horizon_cap": 120 }"#).unwrap();
        assert_eq!(config.horizon_cap, 120);
        assert_eq!(config.min_extra_months, DEFAULT_MIN_EXTRA_MONTHS);
        assert!(!config.detailed_output);
    }
}
