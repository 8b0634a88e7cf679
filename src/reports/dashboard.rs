//! Dashboard figures
//!
//! Lifetime income/expense totals with the most recent activity, and the
//! per-period budget plan (total budgeted vs. total recorded for one kind).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{InsightsError, InsightsResult};
use crate::models::{
    Budget, Category, CategoryId, Money, Period, Transaction, TransactionId, TransactionKind,
};

/// Number of recent transactions shown when none is configured
pub const DEFAULT_RECENT_COUNT: usize = 3;

/// Budgeted vs. recorded totals for one kind in one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub kind: TransactionKind,
    pub period: Period,
    pub budgeted_total: Money,
    pub actual_total: Money,
}

impl BudgetPlan {
    /// `budgeted - actual`; negative when the plan was exceeded
    pub fn remaining(&self) -> Money {
        self.budgeted_total - self.actual_total
    }

    /// Recorded total as a percentage of the budgeted total
    pub fn progress(&self) -> f64 {
        self.actual_total.percentage_of(self.budgeted_total)
    }
}

/// Sum every budget and every transaction that falls in `period`.
///
/// Callers pass rows of a single kind; rows outside the period are ignored.
pub fn budget_plan(
    kind: TransactionKind,
    period: Period,
    transactions: &[Transaction],
    budgets: &[Budget],
) -> BudgetPlan {
    BudgetPlan {
        kind,
        period,
        budgeted_total: budgets
            .iter()
            .filter(|b| b.period == period)
            .map(|b| b.amount)
            .sum(),
        actual_total: transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .map(|t| t.amount)
            .sum(),
    }
}

/// A dashboard activity line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_name: String,
    pub source: String,
    pub amount: Money,
}

/// Lifetime totals and latest activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub balance: Money,
    pub recent_transactions: Vec<RecentTransaction>,
}

/// Build the dashboard from a user's complete transaction history.
///
/// Recent activity spans both kinds: date descending, then amount
/// descending, then id for a total order.
pub fn dashboard_summary(
    income: &[Transaction],
    expenses: &[Transaction],
    categories: &[Category],
    recent_count: usize,
) -> InsightsResult<DashboardSummary> {
    let names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let total_income: Money = income.iter().map(|t| t.amount).sum();
    let total_expenses: Money = expenses.iter().map(|t| t.amount).sum();

    let mut latest: Vec<&Transaction> = income.iter().chain(expenses).collect();
    latest.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.amount.cmp(&a.amount))
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });

    let recent_transactions = latest
        .into_iter()
        .take(recent_count)
        .map(|txn| {
            let name = names
                .get(&txn.category_id)
                .ok_or_else(|| InsightsError::category_not_found(txn.category_id.to_string()))?;
            Ok(RecentTransaction {
                id: txn.id,
                date: txn.date,
                kind: txn.kind,
                category_name: (*name).to_string(),
                source: txn.source.clone(),
                amount: txn.amount,
            })
        })
        .collect::<InsightsResult<Vec<_>>>()?;

    debug!(
        income = income.len(),
        expenses = expenses.len(),
        recent = recent_transactions.len(),
        "built dashboard summary"
    );

    Ok(DashboardSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        recent_transactions,
    })
}
