//! Repayment strategies and the strategy advisor

mod advisor;

pub use advisor::{
    recommend, recommend_with, AdvisorThresholds, RecommendationReason, StrategyRecommendation,
};

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which debt receives the surplus budget each month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first
    Avalanche,
    /// Lowest balance first
    Snowball,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            other => Err(PlannerError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Pick the first item unless a later one is strictly better.
///
/// Equal candidates never displace an earlier one, so ties always resolve to
/// the first occurrence in input order. Both the advisor and the engine's
/// target selection go through here.
pub(crate) fn first_best<T>(
    items: impl IntoIterator<Item = T>,
    is_better: impl Fn(&T, &T) -> bool,
) -> Option<T> {
    items.into_iter().fold(None, |best, item| match best {
        Some(current) if !is_better(&item, &current) => Some(current),
        _ => Some(item),
    })
}
