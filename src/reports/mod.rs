//! Reporting engine for budget-insights
//!
//! Pure functions that turn period-scoped transactions, budgets and
//! categories into aggregated results: category totals, budget comparisons,
//! hotspots, trends, period catalogs, dashboard figures and registers.
//! Nothing here performs I/O; the service layer fetches the rows.

pub mod budget_comparison;
pub mod category_totals;
pub mod dashboard;
pub mod hotspots;
pub mod period_catalog;
pub mod register;
pub mod trend;

pub use budget_comparison::{
    category_budget_rows, compare, compare_over_budget, compare_under_budget, BudgetComparisonEntry,
    BudgetDirection, CategoryBudgetRow,
};
pub use category_totals::{aggregate, grand_total, percentage_shares, CategoryShare, CategoryTotal};
pub use dashboard::{
    budget_plan, dashboard_summary, BudgetPlan, DashboardSummary, RecentTransaction,
    DEFAULT_RECENT_COUNT,
};
pub use hotspots::{top_n, Hotspot, DEFAULT_HOTSPOT_COUNT};
pub use period_catalog::{distinct_periods, distinct_periods_from_strs, distinct_periods_or};
pub use register::{register, RegisterEntry, RegisterFilter, RegisterSort};
pub use trend::{build_trend, trend_window, MonthlySnapshot, MonthlyTotals, DEFAULT_TREND_WINDOW};
