//! Projection engine for monthly debt repayment projections

mod state;
mod engine;
mod points;

pub use state::{DebtBalance, SimulationState};
pub use engine::{
    project, ProjectionConfig, ProjectionEngine, DEFAULT_HORIZON_CAP, DEFAULT_MIN_EXTRA_MONTHS,
};
pub use points::{DebtPayoff, MonthLedger, Projection, ProjectionPoint, ProjectionSummary};
