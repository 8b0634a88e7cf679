//! Trend construction
//!
//! Builds a fixed-length, chronologically ascending window of monthly
//! snapshots ending at a target period. When the activity history is too
//! short, the window is padded with earlier calendar months that have no
//! backing data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{InsightsError, InsightsResult};
use crate::models::{money, Money, Period, Transaction, TransactionKind};

/// Number of periods in a trend window when none is configured
pub const DEFAULT_TREND_WINDOW: usize = 3;

/// Income and expense totals for one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub income: Money,
    pub expense: Money,
}

impl MonthlyTotals {
    /// `income - expense`; may be negative
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    /// `balance / income * 100`, two decimals, or `0.0` when income is zero
    pub fn savings_rate(&self) -> f64 {
        if self.income.is_zero() {
            return 0.0;
        }
        money::percentage(self.balance().cents(), self.income.cents())
    }

    /// Add one transaction to the matching side
    pub fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => self.income += txn.amount,
            TransactionKind::Expense => self.expense += txn.amount,
        }
    }

    /// Totals per period for a mixed set of transactions
    pub fn by_period<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> HashMap<Period, MonthlyTotals> {
        let mut totals: HashMap<Period, MonthlyTotals> = HashMap::new();
        for txn in transactions {
            totals.entry(txn.period()).or_default().record(txn);
        }
        totals
    }
}

/// One point of the trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    /// The period
    pub period: Period,
    /// Income minus expenses
    pub balance: Money,
    /// Balance as a percentage of income
    pub savings_rate: f64,
}

impl MonthlySnapshot {
    /// Snapshot for a period's totals
    pub fn new(period: Period, totals: MonthlyTotals) -> Self {
        Self {
            period,
            balance: totals.balance(),
            savings_rate: totals.savings_rate(),
        }
    }
}

/// The periods of a trend window, oldest first.
///
/// `history` lists the periods with any activity, most recent first and
/// without duplicates. The window takes up to `window_size` consecutive
/// history entries starting at `period` and moving back in time, then pads
/// with the calendar months before the oldest collected one.
pub fn trend_window(
    period: Period,
    history: &[Period],
    window_size: usize,
) -> InsightsResult<Vec<Period>> {
    if window_size < 1 {
        return Err(InsightsError::InvalidWindow(window_size));
    }

    if history.windows(2).any(|pair| pair[0] <= pair[1]) {
        return Err(InsightsError::Validation(
            "activity history must be sorted most recent first without duplicates".into(),
        ));
    }

    let start = history
        .iter()
        .position(|p| *p == period)
        .ok_or(InsightsError::PeriodNotInHistory(period))?;

    let end = (start + window_size).min(history.len());
    let mut window: Vec<Period> = history[start..end].to_vec();
    let collected = window.len();

    while window.len() < window_size {
        // non-empty: it holds at least `period`
        let oldest = window[window.len() - 1];
        window.push(oldest.prev());
    }

    if window.len() > collected {
        debug!(
            %period,
            synthesized = window.len() - collected,
            "padded trend window with months before recorded history"
        );
    }

    window.reverse();
    Ok(window)
}

/// Build the trend for `period`.
///
/// `fetch_monthly_totals` is called once per window period, oldest first;
/// for padded periods it is expected to return zero totals.
pub fn build_trend<F>(
    period: Period,
    history: &[Period],
    mut fetch_monthly_totals: F,
    window_size: usize,
) -> InsightsResult<Vec<MonthlySnapshot>>
where
    F: FnMut(Period) -> InsightsResult<MonthlyTotals>,
{
    trend_window(period, history, window_size)?
        .into_iter()
        .map(|p| Ok(MonthlySnapshot::new(p, fetch_monthly_totals(p)?)))
        .collect()
}
