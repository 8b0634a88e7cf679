//! Report service
//!
//! Orchestrates the engine: each report fetches every row it needs from the
//! ledger up front, then runs the pure functions in [`crate::reports`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::InsightsResult;
use crate::ledger::LedgerQuery;
use crate::models::{
    tips_by_category, Budget, Category, Money, Period, PeriodRange, Transaction, TransactionKind,
    UserId,
};
use crate::reports::{
    aggregate, budget_plan, build_trend, category_budget_rows, compare_over_budget,
    compare_under_budget, dashboard_summary, distinct_periods, grand_total, percentage_shares,
    register, top_n, trend_window, BudgetComparisonEntry, BudgetPlan, CategoryBudgetRow,
    CategoryShare, DashboardSummary, Hotspot, MonthlySnapshot, MonthlyTotals, RegisterEntry,
    RegisterFilter, RegisterSort,
};

/// Category totals with shares for one kind and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub kind: TransactionKind,
    pub period: Period,
    pub total: Money,
    pub categories: Vec<CategoryShare>,
}

/// Budget adherence for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPerformance {
    pub period: Period,
    pub income_plan: BudgetPlan,
    pub expense_plan: BudgetPlan,
    /// Income categories short of their target
    pub under_budget: Vec<BudgetComparisonEntry>,
    /// Expense categories over their limit
    pub over_budget: Vec<BudgetComparisonEntry>,
    pub income_rows: Vec<CategoryBudgetRow>,
    pub expense_rows: Vec<CategoryBudgetRow>,
}

/// Everything shown for a month at a glance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub period: Period,
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub savings_rate: f64,
    pub income_hotspots: Vec<Hotspot>,
    pub expense_hotspots: Vec<Hotspot>,
    pub under_budget: Vec<BudgetComparisonEntry>,
    pub over_budget: Vec<BudgetComparisonEntry>,
    pub trend: Vec<MonthlySnapshot>,
}

/// Rows of one kind fetched for a report
struct KindRows {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
}

impl KindRows {
    fn in_period(&self, period: Period) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .cloned()
            .collect()
    }
}

/// Service producing reports for one ledger
pub struct ReportService<'a, L: LedgerQuery + ?Sized> {
    ledger: &'a L,
    settings: &'a Settings,
}

impl<'a, L: LedgerQuery + ?Sized> ReportService<'a, L> {
    /// Create a new report service
    pub fn new(ledger: &'a L, settings: &'a Settings) -> Self {
        Self { ledger, settings }
    }

    fn fetch(
        &self,
        user: &UserId,
        kind: TransactionKind,
        range: PeriodRange,
        with_budgets: bool,
    ) -> InsightsResult<KindRows> {
        let rows = KindRows {
            categories: self.ledger.categories(kind)?,
            transactions: self.ledger.transactions(user, kind, range)?,
            budgets: if with_budgets {
                self.ledger.budgets(user, kind, range)?
            } else {
                Vec::new()
            },
        };

        debug!(
            %user,
            %kind,
            %range,
            categories = rows.categories.len(),
            transactions = rows.transactions.len(),
            budgets = rows.budgets.len(),
            "fetched report rows"
        );

        Ok(rows)
    }

    /// Periods with any income or expense, most recent first
    pub fn period_catalog(&self, user: &UserId) -> InsightsResult<Vec<Period>> {
        let income = self.ledger.activity_dates(user, TransactionKind::Income)?;
        let expenses = self.ledger.activity_dates(user, TransactionKind::Expense)?;
        Ok(distinct_periods(&income, &expenses))
    }

    /// Periods with activity of one kind, most recent first
    pub fn kind_catalog(&self, user: &UserId, kind: TransactionKind) -> InsightsResult<Vec<Period>> {
        let dates = self.ledger.activity_dates(user, kind)?;
        Ok(distinct_periods(&dates, &[]))
    }

    /// The requested period, or the most recent one with activity
    pub fn resolve_period(&self, user: &UserId, requested: Option<Period>) -> InsightsResult<Period> {
        if let Some(period) = requested {
            return Ok(period);
        }
        let catalog = self.period_catalog(user)?;
        // The catalog is never empty: it falls back to the current period
        Ok(catalog.first().copied().unwrap_or_else(Period::current))
    }

    /// Ranked category totals with percentage shares
    pub fn category_breakdown(
        &self,
        user: &UserId,
        kind: TransactionKind,
        period: Period,
    ) -> InsightsResult<CategoryBreakdown> {
        let rows = self.fetch(user, kind, PeriodRange::single(period), false)?;
        let totals = aggregate(&rows.transactions, &rows.categories)?;

        info!(%user, %kind, %period, "generated category breakdown");

        Ok(CategoryBreakdown {
            kind,
            period,
            total: grand_total(&totals),
            categories: percentage_shares(&totals),
        })
    }

    /// Budget plans, under/over lists and chart rows for a period
    pub fn budget_performance(
        &self,
        user: &UserId,
        period: Period,
    ) -> InsightsResult<BudgetPerformance> {
        let range = PeriodRange::single(period);
        let income = self.fetch(user, TransactionKind::Income, range, true)?;
        let expense = self.fetch(user, TransactionKind::Expense, range, true)?;

        let income_totals = aggregate(&income.transactions, &income.categories)?;
        let expense_totals = aggregate(&expense.transactions, &expense.categories)?;
        let income_tips = tips_by_category(&income.categories);
        let expense_tips = tips_by_category(&expense.categories);

        let report = BudgetPerformance {
            period,
            income_plan: budget_plan(
                TransactionKind::Income,
                period,
                &income.transactions,
                &income.budgets,
            ),
            expense_plan: budget_plan(
                TransactionKind::Expense,
                period,
                &expense.transactions,
                &expense.budgets,
            ),
            under_budget: compare_under_budget(&income_totals, &income.budgets, period, &income_tips),
            over_budget: compare_over_budget(&expense_totals, &expense.budgets, period, &expense_tips),
            income_rows: category_budget_rows(&income_totals, &income.budgets, period),
            expense_rows: category_budget_rows(&expense_totals, &expense.budgets, period),
        };

        info!(
            %user,
            %period,
            under = report.under_budget.len(),
            over = report.over_budget.len(),
            "generated budget performance"
        );

        Ok(report)
    }

    /// Top categories of one kind; `count` overrides the configured size
    pub fn hotspots(
        &self,
        user: &UserId,
        kind: TransactionKind,
        period: Period,
        count: Option<usize>,
    ) -> InsightsResult<Vec<Hotspot>> {
        let rows = self.fetch(user, kind, PeriodRange::single(period), false)?;
        let totals = aggregate(&rows.transactions, &rows.categories)?;
        let n = count.unwrap_or(self.settings.hotspot_count);

        info!(%user, %kind, %period, n, "generated hotspots");
        Ok(top_n(&totals, n, &tips_by_category(&rows.categories)))
    }

    /// Balance and savings-rate trend ending at `period`; `window` overrides
    /// the configured size
    pub fn trend(
        &self,
        user: &UserId,
        period: Period,
        window: Option<usize>,
    ) -> InsightsResult<Vec<MonthlySnapshot>> {
        let window = window.unwrap_or(self.settings.trend_window);
        let history = self.period_catalog(user)?;
        let periods = trend_window(period, &history, window)?;
        let range = window_range(&periods, period);

        let income = self.ledger.transactions(user, TransactionKind::Income, range)?;
        let expenses = self.ledger.transactions(user, TransactionKind::Expense, range)?;

        let trend = trend_from_rows(period, &history, &income, &expenses, window)?;
        info!(%user, %period, window, "generated trend");
        Ok(trend)
    }

    /// Hotspots, budget misses and trend for one period in a single report
    pub fn summary(&self, user: &UserId, period: Period) -> InsightsResult<SummaryReport> {
        let window = self.settings.trend_window;
        let history = self.period_catalog(user)?;
        let periods = trend_window(period, &history, window)?;
        let range = window_range(&periods, period);

        let income = self.fetch(user, TransactionKind::Income, range, true)?;
        let expense = self.fetch(user, TransactionKind::Expense, range, true)?;

        let income_now = income.in_period(period);
        let expense_now = expense.in_period(period);
        let income_totals = aggregate(&income_now, &income.categories)?;
        let expense_totals = aggregate(&expense_now, &expense.categories)?;
        let income_tips = tips_by_category(&income.categories);
        let expense_tips = tips_by_category(&expense.categories);

        let month = MonthlyTotals {
            income: grand_total(&income_totals),
            expense: grand_total(&expense_totals),
        };
        let n = self.settings.hotspot_count;

        let report = SummaryReport {
            period,
            total_income: month.income,
            total_expenses: month.expense,
            balance: month.balance(),
            savings_rate: month.savings_rate(),
            income_hotspots: top_n(&income_totals, n, &income_tips),
            expense_hotspots: top_n(&expense_totals, n, &expense_tips),
            under_budget: compare_under_budget(&income_totals, &income.budgets, period, &income_tips),
            over_budget: compare_over_budget(&expense_totals, &expense.budgets, period, &expense_tips),
            trend: trend_from_rows(
                period,
                &history,
                &income.transactions,
                &expense.transactions,
                window,
            )?,
        };

        info!(%user, %period, "generated summary report");
        Ok(report)
    }

    /// Lifetime totals and the most recent transactions
    pub fn dashboard(&self, user: &UserId) -> InsightsResult<DashboardSummary> {
        let income = self.ledger.all_transactions(user, TransactionKind::Income)?;
        let expenses = self.ledger.all_transactions(user, TransactionKind::Expense)?;
        let mut categories = self.ledger.categories(TransactionKind::Income)?;
        categories.extend(self.ledger.categories(TransactionKind::Expense)?);

        let summary = dashboard_summary(
            &income,
            &expenses,
            &categories,
            self.settings.recent_transaction_count,
        )?;

        info!(%user, "generated dashboard");
        Ok(summary)
    }

    /// One period's transactions of a kind, filtered and sorted
    pub fn register(
        &self,
        user: &UserId,
        kind: TransactionKind,
        period: Period,
        filter: &RegisterFilter,
        sort: RegisterSort,
    ) -> InsightsResult<Vec<RegisterEntry>> {
        let rows = self.fetch(user, kind, PeriodRange::single(period), false)?;
        let entries = register(&rows.transactions, &rows.categories, filter, sort)?;

        info!(%user, %kind, %period, %sort, entries = entries.len(), "generated register");
        Ok(entries)
    }
}

/// Range covering a trend window, which is ascending and ends at `period`
fn window_range(periods: &[Period], period: Period) -> PeriodRange {
    let oldest = periods.first().copied().unwrap_or(period);
    PeriodRange::new(oldest, period)
}

/// Build the trend from rows already fetched for the whole window
fn trend_from_rows(
    period: Period,
    history: &[Period],
    income: &[Transaction],
    expenses: &[Transaction],
    window: usize,
) -> InsightsResult<Vec<MonthlySnapshot>> {
    let by_period = MonthlyTotals::by_period(income.iter().chain(expenses));
    build_trend(
        period,
        history,
        |p| Ok(by_period.get(&p).copied().unwrap_or_default()),
        window,
    )
}
