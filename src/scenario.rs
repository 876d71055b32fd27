//! Scenario runner for repeated projections
//!
//! Fixes the configuration and the "today" date once, then runs projections
//! for different debt sets, budgets and strategies. Switching strategy is
//! always a full recompute.

use crate::debt::Debt;
use crate::error::Result;
use crate::projection::{Projection, ProjectionConfig, ProjectionEngine};
use crate::strategy::{recommend, Strategy};
use chrono::NaiveDate;
use serde::Serialize;

/// Pre-configured runner for batches of projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(today);
/// let comparison = runner.compare(&debts, 1_500.0)?;
/// println!("avalanche saves {:.2}", comparison.interest_saved_by_avalanche());
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    today: NaiveDate,
}

impl ScenarioRunner {
    /// Create runner with the default projection config
    pub fn new(today: NaiveDate) -> Self {
        Self::with_config(ProjectionConfig::default(), today)
    }

    pub fn with_config(config: ProjectionConfig, today: NaiveDate) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
            today,
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Run a single projection with an explicit strategy
    pub fn run(&self, debts: &[Debt], monthly_budget: f64, strategy: Strategy) -> Result<Projection> {
        self.engine.project(debts, monthly_budget, strategy, self.today)
    }

    /// Run with the advisor's default strategy (avalanche when nothing is owed)
    pub fn run_recommended(&self, debts: &[Debt], monthly_budget: f64) -> Result<Projection> {
        let strategy = recommend(debts)
            .map(|rec| rec.recommended)
            .unwrap_or(Strategy::Avalanche);
        self.run(debts, monthly_budget, strategy)
    }

    /// Run both strategies on the same inputs
    pub fn compare(&self, debts: &[Debt], monthly_budget: f64) -> Result<StrategyComparison> {
        Ok(StrategyComparison {
            avalanche: self.run(debts, monthly_budget, Strategy::Avalanche)?,
            snowball: self.run(debts, monthly_budget, Strategy::Snowball)?,
        })
    }

    /// Run one strategy over several budgets
    pub fn run_budgets(
        &self,
        debts: &[Debt],
        budgets: &[f64],
        strategy: Strategy,
    ) -> Result<Vec<Projection>> {
        budgets
            .iter()
            .map(|&budget| self.run(debts, budget, strategy))
            .collect()
    }
}

/// Avalanche and snowball projections for the same inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyComparison {
    pub avalanche: Projection,
    pub snowball: Projection,
}

impl StrategyComparison {
    pub fn get(&self, strategy: Strategy) -> &Projection {
        match strategy {
            Strategy::Avalanche => &self.avalanche,
            Strategy::Snowball => &self.snowball,
        }
    }

    /// Interest avoided by choosing avalanche (negative if snowball is cheaper)
    pub fn interest_saved_by_avalanche(&self) -> f64 {
        self.snowball.total_interest - self.avalanche.total_interest
    }

    /// Months avoided by choosing avalanche (negative if snowball is faster)
    pub fn months_saved_by_avalanche(&self) -> i64 {
        self.snowball.debt_free_month_index as i64 - self.avalanche.debt_free_month_index as i64
    }

    /// Strategy reaching zero debt first; avalanche on a tie
    pub fn faster(&self) -> Strategy {
        if self.snowball.debt_free_month_index < self.avalanche.debt_free_month_index {
            Strategy::Snowball
        } else {
            Strategy::Avalanche
        }
    }
}
