//! Budget comparison
//!
//! Joins a period's aggregated actuals against that period's budgets.
//! Income categories are reported when they fall short of their budget,
//! expense categories when they exceed it.
//!
//! Candidates are only the categories with a nonzero actual in the period:
//! a category with no recorded activity is never compared, even if it has a
//! budget. An income category with zero income is therefore never reported
//! as under budget.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Budget, CategoryId, Money, Period, TipsByCategory};

use super::category_totals::CategoryTotal;

/// A category that missed its budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparisonEntry {
    /// Category name
    pub category_name: String,
    /// Budgeted amount for the period
    pub budgeted_amount: Money,
    /// Actual amount for the period
    pub actual_amount: Money,
    /// Category guidance text
    pub tips: String,
}

impl BudgetComparisonEntry {
    /// `actual - budgeted`; negative when under budget
    pub fn variance(&self) -> Money {
        self.actual_amount - self.budgeted_amount
    }
}

/// Which side of the budget is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDirection {
    /// Actual below budget (income shortfall)
    Under,
    /// Actual above budget (expense overrun)
    Over,
}

impl BudgetDirection {
    fn misses(&self, actual: Money, budgeted: Money) -> bool {
        match self {
            Self::Under => actual < budgeted,
            Self::Over => actual > budgeted,
        }
    }
}

/// One row of the actual-vs-budget chart view
///
/// Unlike [`BudgetComparisonEntry`], every category appears and a missing
/// budget reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudgetRow {
    /// Category name
    pub category_name: String,
    /// Actual amount for the period
    pub actual: Money,
    /// Budgeted amount for the period, zero when unset
    pub budgeted: Money,
}

/// Budgets for exactly `period`, keyed by category. The first budget wins
/// if the ledger holds duplicates.
fn budgets_for_period(budgets: &[Budget], period: Period) -> HashMap<CategoryId, Money> {
    let mut by_category = HashMap::new();
    for budget in budgets.iter().filter(|b| b.period == period) {
        by_category.entry(budget.category_id).or_insert(budget.amount);
    }
    by_category
}

/// Compare actuals against budgets in one direction.
///
/// Output is sorted by category name.
pub fn compare(
    actuals: &[CategoryTotal],
    budgets: &[Budget],
    period: Period,
    tips: &TipsByCategory,
    direction: BudgetDirection,
) -> Vec<BudgetComparisonEntry> {
    let budgeted = budgets_for_period(budgets, period);

    let candidates: Vec<&CategoryTotal> = actuals
        .iter()
        .filter(|actual| !actual.total.is_zero())
        .collect();

    let mut entries: Vec<BudgetComparisonEntry> = candidates
        .iter()
        .filter_map(|actual| {
            let budget = *budgeted.get(&actual.category_id)?;
            direction
                .misses(actual.total, budget)
                .then(|| BudgetComparisonEntry {
                    category_name: actual.category_name.clone(),
                    budgeted_amount: budget,
                    actual_amount: actual.total,
                    tips: tips.get(&actual.category_id).cloned().unwrap_or_default(),
                })
        })
        .collect();

    entries.sort_by(|a, b| a.category_name.cmp(&b.category_name));

    debug!(
        %period,
        ?direction,
        candidates = candidates.len(),
        budgets = budgeted.len(),
        reported = entries.len(),
        "compared actuals against budgets"
    );

    entries
}

/// Income categories whose actual fell short of the period's budget
pub fn compare_under_budget(
    actuals: &[CategoryTotal],
    budgets: &[Budget],
    period: Period,
    tips: &TipsByCategory,
) -> Vec<BudgetComparisonEntry> {
    compare(actuals, budgets, period, tips, BudgetDirection::Under)
}

/// Expense categories whose actual exceeded the period's budget
pub fn compare_over_budget(
    actuals: &[CategoryTotal],
    budgets: &[Budget],
    period: Period,
    tips: &TipsByCategory,
) -> Vec<BudgetComparisonEntry> {
    compare(actuals, budgets, period, tips, BudgetDirection::Over)
}

/// Actual and budgeted amounts for every category, in the order of `totals`
pub fn category_budget_rows(
    totals: &[CategoryTotal],
    budgets: &[Budget],
    period: Period,
) -> Vec<CategoryBudgetRow> {
    let budgeted = budgets_for_period(budgets, period);

    totals
        .iter()
        .map(|t| CategoryBudgetRow {
            category_name: t.category_name.clone(),
            actual: t.total,
            budgeted: budgeted.get(&t.category_id).copied().unwrap_or_default(),
        })
        .collect()
}
