//! Terminal views of report results
//!
//! Each function renders one report as fixed-width text.

use crate::models::{Period, TransactionKind};
use crate::reports::{
    BudgetComparisonEntry, BudgetPlan, DashboardSummary, Hotspot, MonthlySnapshot, RegisterEntry,
};
use crate::services::{BudgetPerformance, CategoryBreakdown, SummaryReport};

use super::report::{
    format_bar, format_money, format_percentage, format_title, separator, truncate, REPORT_WIDTH,
};

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

/// Period catalog, most recent first
pub fn format_periods(periods: &[Period]) -> String {
    let mut output = format_title("Periods with activity");
    for period in periods {
        output.push_str(&format!("  {}  {}\n", period, period.long_name()));
    }
    output
}

/// Category totals with shares and a proportional bar
pub fn format_category_breakdown(breakdown: &CategoryBreakdown, symbol: &str) -> String {
    let mut output = format_title(&format!(
        "{} by Category: {}",
        kind_label(breakdown.kind),
        breakdown.period.long_name()
    ));

    let max = breakdown
        .categories
        .first()
        .map(|c| c.total.as_units())
        .unwrap_or(0.0);

    output.push_str(&format!(
        "{:<24} {:>14} {:>9}  {}\n",
        "Category", "Total", "Share", ""
    ));
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    for share in &breakdown.categories {
        output.push_str(&format!(
            "{:<24} {:>14} {:>9}  {}\n",
            truncate(&share.category_name, 24),
            format_money(share.total, symbol),
            format_percentage(share.percentage),
            format_bar(share.total.as_units(), max, 18),
        ));
    }

    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:>14}\n",
        "TOTAL",
        format_money(breakdown.total, symbol)
    ));
    output
}

fn format_entries(title: &str, entries: &[BudgetComparisonEntry], symbol: &str) -> String {
    let mut output = format!("{}\n", title);
    if entries.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }

    for entry in entries {
        output.push_str(&format!(
            "  {:<22} budgeted {:>12}  actual {:>12}  ({})\n",
            truncate(&entry.category_name, 22),
            format_money(entry.budgeted_amount, symbol),
            format_money(entry.actual_amount, symbol),
            format_money(entry.variance(), symbol),
        ));
        if !entry.tips.is_empty() {
            output.push_str(&format!("    tip: {}\n", entry.tips));
        }
    }
    output
}

fn format_plan(plan: &BudgetPlan, symbol: &str) -> String {
    format!(
        "{:<8} budgeted {:>12}  actual {:>12}  remaining {:>12}  ({})\n",
        kind_label(plan.kind),
        format_money(plan.budgeted_total, symbol),
        format_money(plan.actual_total, symbol),
        format_money(plan.remaining(), symbol),
        format_percentage(plan.progress()),
    )
}

/// Budget plans and misses for a period
pub fn format_budget_performance(report: &BudgetPerformance, symbol: &str) -> String {
    let mut output = format_title(&format!("Budget: {}", report.period.long_name()));
    output.push_str(&format_plan(&report.income_plan, symbol));
    output.push_str(&format_plan(&report.expense_plan, symbol));
    output.push('\n');
    output.push_str(&format_entries("Income under budget", &report.under_budget, symbol));
    output.push('\n');
    output.push_str(&format_entries("Expenses over budget", &report.over_budget, symbol));
    output
}

/// Ranked hotspots with tips
pub fn format_hotspots(
    kind: TransactionKind,
    period: Period,
    hotspots: &[Hotspot],
    symbol: &str,
) -> String {
    let mut output = format_title(&format!(
        "Top {} Categories: {}",
        kind_label(kind),
        period.long_name()
    ));
    output.push_str(&hotspot_lines(hotspots, symbol));
    output
}

fn hotspot_lines(hotspots: &[Hotspot], symbol: &str) -> String {
    if hotspots.is_empty() {
        return "  (no categories)\n".to_string();
    }

    let mut output = String::new();
    for (rank, hotspot) in hotspots.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {:<24} {:>14}\n",
            rank + 1,
            truncate(&hotspot.category_name, 24),
            format_money(hotspot.total_amount, symbol),
        ));
        if !hotspot.tips.is_empty() {
            output.push_str(&format!("     tip: {}\n", hotspot.tips));
        }
    }
    output
}

/// Trend table, oldest period first
pub fn format_trend(trend: &[MonthlySnapshot], symbol: &str) -> String {
    let mut output = format_title("Balance Trend");
    output.push_str(&trend_lines(trend, symbol));
    output
}

fn trend_lines(trend: &[MonthlySnapshot], symbol: &str) -> String {
    let max = trend
        .iter()
        .map(|s| s.balance.as_units())
        .fold(0.0_f64, f64::max);

    let mut output = format!("{:<10} {:>14} {:>13}\n", "Period", "Balance", "Savings");
    for snapshot in trend {
        output.push_str(&format!(
            "{:<10} {:>14} {:>13}  {}\n",
            snapshot.period.to_string(),
            format_money(snapshot.balance, symbol),
            format_percentage(snapshot.savings_rate),
            format_bar(snapshot.balance.as_units(), max, 20),
        ));
    }
    output
}

/// Full monthly summary
pub fn format_summary(report: &SummaryReport, symbol: &str) -> String {
    let mut output = format_title(&format!("Summary: {}", report.period.long_name()));

    output.push_str(&format!(
        "Income:       {:>14}\n",
        format_money(report.total_income, symbol)
    ));
    output.push_str(&format!(
        "Expenses:     {:>14}\n",
        format_money(report.total_expenses, symbol)
    ));
    output.push_str(&format!(
        "Balance:      {:>14}\n",
        format_money(report.balance, symbol)
    ));
    output.push_str(&format!(
        "Savings rate: {:>14}\n\n",
        format_percentage(report.savings_rate)
    ));

    output.push_str("Top income sources\n");
    output.push_str(&hotspot_lines(&report.income_hotspots, symbol));
    output.push_str("\nTop expenses\n");
    output.push_str(&hotspot_lines(&report.expense_hotspots, symbol));
    output.push('\n');
    output.push_str(&format_entries("Income under budget", &report.under_budget, symbol));
    output.push('\n');
    output.push_str(&format_entries("Expenses over budget", &report.over_budget, symbol));
    output.push('\n');
    output.push_str(&trend_lines(&report.trend, symbol));
    output
}

/// Lifetime dashboard
pub fn format_dashboard(summary: &DashboardSummary, symbol: &str) -> String {
    let mut output = format_title("Dashboard");
    output.push_str(&format!(
        "Total income:   {:>14}\n",
        format_money(summary.total_income, symbol)
    ));
    output.push_str(&format!(
        "Total expenses: {:>14}\n",
        format_money(summary.total_expenses, symbol)
    ));
    output.push_str(&format!(
        "Balance:        {:>14}\n\n",
        format_money(summary.balance, symbol)
    ));

    output.push_str("Recent transactions\n");
    if summary.recent_transactions.is_empty() {
        output.push_str("  (none)\n");
    }
    for txn in &summary.recent_transactions {
        output.push_str(&format!(
            "  {}  {:<8} {:<20} {:>14}  {}\n",
            txn.date,
            txn.kind.to_string(),
            truncate(&txn.category_name, 20),
            format_money(txn.amount, symbol),
            txn.source,
        ));
    }
    output
}

/// Transaction register
pub fn format_register(entries: &[RegisterEntry], symbol: &str) -> String {
    if entries.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = format!(
        "{:<10}  {:<20} {:<24} {:>14}\n",
        "Date", "Category", "Source", "Amount"
    );
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    for entry in entries {
        output.push_str(&format!(
            "{:<10}  {:<20} {:<24} {:>14}\n",
            entry.date.to_string(),
            truncate(&entry.category_name, 20),
            truncate(&entry.source, 24),
            format_money(entry.amount, symbol),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Money};
    use crate::reports::CategoryShare;

    fn p() -> Period {
        Period::new(2024, 3).unwrap()
    }

    #[test]
    fn test_breakdown_lists_every_category() {
        let breakdown = CategoryBreakdown {
            kind: TransactionKind::Expense,
            period: p(),
            total: Money::from_cents(8000),
            categories: vec![
                CategoryShare {
                    category_id: CategoryId::new(),
                    category_name: "Food".into(),
                    total: Money::from_cents(8000),
                    percentage: 100.0,
                },
                CategoryShare {
                    category_id: CategoryId::new(),
                    category_name: "Rent".into(),
                    total: Money::zero(),
                    percentage: 0.0,
                },
            ],
        };

        let text = format_category_breakdown(&breakdown, "$");
        assert!(text.contains("Expense by Category: March 2024"));
        assert!(text.contains("$80.00"));
        assert!(text.contains("100.00%"));
        assert!(text.contains("Rent"));
        assert!(text.contains("0.00%"));
    }

    #[test]
    fn test_hotspots_show_tips() {
        let hotspots = vec![Hotspot {
            category_name: "Rent".into(),
            total_amount: Money::from_cents(120000),
            tips: "Find a roommate".into(),
        }];
        let text = format_hotspots(TransactionKind::Expense, p(), &hotspots, "€");
        assert!(text.contains("1. Rent"));
        assert!(text.contains("€1200.00"));
        assert!(text.contains("tip: Find a roommate"));
    }

    #[test]
    fn test_trend_keeps_negative_balance() {
        let trend = vec![MonthlySnapshot {
            period: p(),
            balance: Money::from_cents(-5000),
            savings_rate: -50.0,
        }];
        let text = format_trend(&trend, "$");
        assert!(text.contains("-$50.00"));
        assert!(text.contains("-50.00%"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_register(&[], "$"), "No transactions found.\n");
    }
}
