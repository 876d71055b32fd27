//! Household cash flow and monthly repayment budget derivation
//!
//! The repayment budget is every minimum payment plus whatever free cash
//! flow is left after expenses. A negative free cash flow shrinks the budget
//! below the minimums, which the engine handles as a degraded month rather
//! than an error.

use crate::debt::Debt;
use crate::error::{InputError, PlannerError, Result};
use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single recurring monthly income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub label: String,
    pub amount: f64,
}

impl BudgetItem {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Monthly incomes and expenses of a household (debt payments excluded)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdBudget {
    #[serde(default)]
    pub incomes: Vec<BudgetItem>,
    #[serde(default)]
    pub expenses: Vec<BudgetItem>,
}

impl HouseholdBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_income(mut self, label: impl Into<String>, amount: f64) -> Self {
        self.incomes.push(BudgetItem::new(label, amount));
        self
    }

    pub fn with_expense(mut self, label: impl Into<String>, amount: f64) -> Self {
        self.expenses.push(BudgetItem::new(label, amount));
        self
    }

    pub fn total_income(&self) -> f64 {
        self.incomes.iter().map(|i| i.amount).sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Income left after expenses and the minimums of active debts
    pub fn free_cash_flow(&self, debts: &[Debt]) -> f64 {
        self.total_income() - self.total_expenses() - total_min_payments(debts)
    }

    /// Total monthly firepower: minimums plus free cash flow, floored at 0
    pub fn monthly_budget(&self, debts: &[Debt]) -> Result<f64> {
        self.validate()?;

        let free_cash_flow = self.free_cash_flow(debts);
        if free_cash_flow < 0.0 {
            log::warn!(
                "expenses and minimum payments exceed income by {:.2}; projection will run on a degraded budget",
                -free_cash_flow
            );
        }

        Ok((total_min_payments(debts) + free_cash_flow).max(0.0))
    }

    /// Reject negative or non-finite amounts
    pub fn validate(&self) -> std::result::Result<(), InputError> {
        for item in self.incomes.iter().chain(self.expenses.iter()) {
            if !item.amount.is_finite() || item.amount < 0.0 {
                return Err(InputError::InvalidBudgetItem {
                    label: item.label.clone(),
                    amount: item.amount,
                });
            }
        }
        Ok(())
    }
}

/// Sum of minimum payments over debts with an outstanding balance
pub fn total_min_payments(debts: &[Debt]) -> f64 {
    debts
        .iter()
        .filter(|d| d.is_active())
        .map(|d| d.min_payment)
        .sum()
}

/// Raw CSV row: `kind,label,amount`
#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    label: String,
    amount: f64,
}

/// Load a household budget from a CSV file
pub fn load_budget<P: AsRef<Path>>(path: P) -> Result<HouseholdBudget> {
    let file = std::fs::File::open(path)?;
    load_budget_from_reader(file)
}

/// Load a household budget from any reader
pub fn load_budget_from_reader<R: std::io::Read>(reader: R) -> Result<HouseholdBudget> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut budget = HouseholdBudget::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let item = BudgetItem::new(row.label, row.amount);
        match row.kind.to_ascii_lowercase().as_str() {
            "income" => budget.incomes.push(item),
            "expense" => budget.expenses.push(item),
            _ => return Err(PlannerError::UnknownBudgetKind(row.kind)),
        }
    }

    budget.validate()?;
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn debts() -> Vec<Debt> {
        vec![
            Debt::new("card", "Card", 2_000.0, 30.0, 100.0),
            Debt::new("car", "Car", 9_000.0, 7.0, 250.0),
            Debt::new("paid", "Paid", 500.0, 0.0, 75.0).with_current_amount(0.0),
        ]
    }

    #[test]
    fn test_budget_includes_minimums_and_surplus() {
        let budget = HouseholdBudget::new()
            .with_income("salary", 3_200.0)
            .with_income("side job", 300.0)
            .with_expense("rent", 1_400.0)
            .with_expense("groceries", 600.0);

        assert_relative_eq!(budget.total_income(), 3_500.0);
        assert_relative_eq!(budget.total_expenses(), 2_000.0);
        // Paid-off debt's minimum does not count
        assert_relative_eq!(total_min_payments(&debts()), 350.0);
        assert_relative_eq!(budget.free_cash_flow(&debts()), 1_150.0);
        assert_relative_eq!(budget.monthly_budget(&debts()).unwrap(), 1_500.0);
    }

    #[test]
    fn test_shortfall_shrinks_budget() {
        let budget = HouseholdBudget::new()
            .with_income("salary", 2_100.0)
            .with_expense("rent", 1_900.0);

        assert_relative_eq!(budget.free_cash_flow(&debts()), -150.0);
        assert_relative_eq!(budget.monthly_budget(&debts()).unwrap(), 200.0);
    }

    #[test]
    fn test_budget_floored_at_zero() {
        let budget = HouseholdBudget::new()
            .with_income("salary", 1_000.0)
            .with_expense("rent", 1_500.0);
        assert_eq!(budget.monthly_budget(&debts()).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_item_rejected() {
        let budget = HouseholdBudget::new().with_income("salary", -10.0);
        assert!(matches!(
            budget.monthly_budget(&debts()),
            Err(PlannerError::InvalidInput(InputError::InvalidBudgetItem { .. }))
        ));
    }

    #[test]
    fn test_load_budget_csv() {
        let csv = "\
kind,label,amount
income,Salary,3200
Expense,Rent,1400
expense,Utilities,180
";
        let budget = load_budget_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(budget.incomes.len(), 1);
        assert_eq!(budget.expenses.len(), 2);
        assert_relative_eq!(budget.total_expenses(), 1_580.0);
    }

    #[test]
    fn test_load_budget_unknown_kind() {
        let csv = "kind,label,amount\nbonus,Gift,100\n";
        assert!(matches!(
            load_budget_from_reader(csv.as_bytes()),
            Err(PlannerError::UnknownBudgetKind(kind)) if kind == "bonus"
        ));
    }
}
