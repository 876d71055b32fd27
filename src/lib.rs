//! Debt Freedom - monthly debt repayment projection engine
//!
//! This library provides:
//! - A strategy advisor recommending avalanche (highest rate first) or
//!   snowball (lowest balance first) repayment
//! - A month-by-month projection of debt balances and post-payoff wealth
//! - Household budget derivation from incomes, expenses and minimum payments
//! - Strategy comparison and batch scenario runs

pub mod error;
pub mod debt;
pub mod budget;
pub mod strategy;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{InputError, PlannerError, Result};
pub use debt::{Debt, DebtId};
pub use budget::{BudgetItem, HouseholdBudget};
pub use strategy::{recommend, Strategy, StrategyRecommendation};
pub use projection::{project, Projection, ProjectionConfig, ProjectionEngine, ProjectionPoint};
pub use scenario::{ScenarioRunner, StrategyComparison};
