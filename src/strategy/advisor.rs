//! Strategy advisor: picks a default repayment strategy for a debt set

use super::{first_best, Strategy};
use crate::debt::Debt;
use serde::Serialize;
use std::fmt;

/// Thresholds driving the advisor's decision policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdvisorThresholds {
    /// Annual rate (percent) above which the costliest debt is attacked first
    pub very_high_interest_rate: f64,

    /// Balance under which the smallest debt is cleared first
    pub small_balance: f64,
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self {
            very_high_interest_rate: 40.0,
            small_balance: 5_000.0,
        }
    }
}

/// Why the advisor picked its strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationReason {
    /// A debt's rate exceeds the very-high-interest threshold
    VeryHighInterest { name: String, rate: f64 },
    /// A debt's balance is below the small-balance threshold
    SmallBalance { name: String, balance: f64 },
    /// No special trigger; fall back to the cheapest ordering
    MinimizeInterest,
}

impl fmt::Display for RecommendationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationReason::VeryHighInterest { name, rate } => write!(
                f,
                "{} has a very high interest rate ({}%): attack it first to save the most money.",
                name, rate
            ),
            RecommendationReason::SmallBalance { name, balance } => write!(
                f,
                "{} is a small debt ({:.0}): eliminate it fast for immediate motivation.",
                name, balance
            ),
            RecommendationReason::MinimizeInterest => f.write_str(
                "Paying the highest interest rate first minimizes the total interest paid over time.",
            ),
        }
    }
}

/// The advisor's suggestion for one debt set
///
/// Borrows the triggering debts from the caller's set; it is recomputed
/// whenever that set changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecommendation<'a> {
    pub recommended: Strategy,
    pub reason: RecommendationReason,
    pub highest_interest_debt: &'a Debt,
    pub lowest_balance_debt: &'a Debt,
}

impl StrategyRecommendation<'_> {
    /// Human-readable justification
    pub fn reason_text(&self) -> String {
        self.reason.to_string()
    }
}

/// Recommend a strategy using the default thresholds.
///
/// Returns `None` when no debt has an outstanding balance.
pub fn recommend(debts: &[Debt]) -> Option<StrategyRecommendation<'_>> {
    recommend_with(debts, &AdvisorThresholds::default())
}

/// Recommend a strategy using custom thresholds
pub fn recommend_with<'a>(
    debts: &'a [Debt],
    thresholds: &AdvisorThresholds,
) -> Option<StrategyRecommendation<'a>> {
    let active = || debts.iter().filter(|d| d.is_active());

    let highest_interest_debt = first_best(active(), |a, b| a.annual_rate() > b.annual_rate())?;
    let lowest_balance_debt = first_best(active(), |a, b| a.current_amount < b.current_amount)?;

    let (recommended, reason) =
        if highest_interest_debt.annual_rate() > thresholds.very_high_interest_rate {
            (
                Strategy::Avalanche,
                RecommendationReason::VeryHighInterest {
                    name: highest_interest_debt.name.clone(),
                    rate: highest_interest_debt.annual_rate(),
                },
            )
        } else if lowest_balance_debt.current_amount < thresholds.small_balance {
            (
                Strategy::Snowball,
                RecommendationReason::SmallBalance {
                    name: lowest_balance_debt.name.clone(),
                    balance: lowest_balance_debt.current_amount,
                },
            )
        } else {
            (Strategy::Avalanche, RecommendationReason::MinimizeInterest)
        };

    log::debug!(
        "advisor recommends {} (highest rate: {}, lowest balance: {})",
        recommended,
        highest_interest_debt.id,
        lowest_balance_debt.id
    );

    Some(StrategyRecommendation {
        recommended,
        reason,
        highest_interest_debt,
        lowest_balance_debt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_very_high_interest_wins() {
        let debts = vec![
            Debt::new("store", "Store card", 800.0, 12.0, 40.0),
            Debt::new("payday", "Payday loan", 9_000.0, 65.0, 300.0),
        ];
        let rec = recommend(&debts).unwrap();

        assert_eq!(rec.recommended, Strategy::Avalanche);
        assert_eq!(rec.highest_interest_debt.id.as_str(), "payday");
        assert_eq!(rec.lowest_balance_debt.id.as_str(), "store");
        assert_eq!(
            rec.reason,
            RecommendationReason::VeryHighInterest {
                name: "Payday loan".to_string(),
                rate: 65.0,
            }
        );
        assert!(rec.reason_text().contains("Payday loan"));
        assert!(rec.reason_text().contains("65%"));
    }

    #[test]
    fn test_small_balance_snowball() {
        let debts = vec![
            Debt::new("car", "Car loan", 15_000.0, 9.0, 300.0),
            Debt::new("phone", "Phone plan", 1_200.0, 0.0, 60.0),
        ];
        let rec = recommend(&debts).unwrap();

        assert_eq!(rec.recommended, Strategy::Snowball);
        assert_eq!(rec.lowest_balance_debt.id.as_str(), "phone");
        assert!(rec.reason_text().contains("Phone plan"));
        assert!(rec.reason_text().contains("1200"));
    }

    #[test]
    fn test_fallback_avalanche() {
        let debts = vec![
            Debt::new("car", "Car loan", 15_000.0, 9.0, 300.0),
            Debt::new("student", "Student loan", 22_000.0, 4.5, 180.0),
        ];
        let rec = recommend(&debts).unwrap();

        assert_eq!(rec.recommended, Strategy::Avalanche);
        assert_eq!(rec.reason, RecommendationReason::MinimizeInterest);
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly 40% is not "very high"; exactly 5000 is not "small"
        let debts = vec![Debt::new("card", "Card", 5_000.0, 40.0, 100.0)];
        let rec = recommend(&debts).unwrap();
        assert_eq!(rec.reason, RecommendationReason::MinimizeInterest);
    }

    #[test]
    fn test_paid_debts_ignored() {
        let debts = vec![
            Debt::new("old", "Old card", 500.0, 80.0, 25.0).with_current_amount(0.0),
            Debt::new("car", "Car loan", 15_000.0, 9.0, 300.0),
        ];
        let rec = recommend(&debts).unwrap();
        assert_eq!(rec.highest_interest_debt.id.as_str(), "car");
        assert_eq!(rec.lowest_balance_debt.id.as_str(), "car");
    }

    #[test]
    fn test_no_active_debts() {
        let debts = vec![Debt::new("old", "Old card", 500.0, 80.0, 25.0).with_current_amount(0.0)];
        assert!(recommend(&debts).is_none());
        assert!(recommend(&[]).is_none());
    }

    #[test]
    fn test_ties_resolve_to_first() {
        let mut no_rate = Debt::new("b", "B", 7_000.0, 0.0, 100.0);
        no_rate.interest_rate = None;
        let debts = vec![
            Debt::new("a", "A", 7_000.0, 0.0, 100.0),
            no_rate,
            Debt::new("c", "C", 7_000.0, 0.0, 100.0),
        ];
        let rec = recommend(&debts).unwrap();
        assert_eq!(rec.highest_interest_debt.id.as_str(), "a");
        assert_eq!(rec.lowest_balance_debt.id.as_str(), "a");
    }

    #[test]
    fn test_custom_thresholds() {
        let debts = vec![Debt::new("card", "Card", 8_000.0, 25.0, 200.0)];
        let thresholds = AdvisorThresholds {
            very_high_interest_rate: 20.0,
            ..Default::default()
        };
        let rec = recommend_with(&debts, &thresholds).unwrap();
        assert!(matches!(rec.reason, RecommendationReason::VeryHighInterest { .. }));
    }
}
