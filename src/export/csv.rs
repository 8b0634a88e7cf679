//! CSV export of tabular report results
//!
//! Amounts are written with exactly two decimals and no currency symbol so
//! spreadsheets read them as numbers.

use serde::Serialize;
use std::io::Write;

use crate::error::{InsightsError, InsightsResult};
use crate::models::{Money, Period};
use crate::reports::{
    BudgetComparisonEntry, BudgetDirection, CategoryShare, Hotspot, MonthlySnapshot, RegisterEntry,
};

fn amount(money: Money) -> String {
    money.format_with_symbol("")
}

fn percent(value: f64) -> String {
    format!("{:.2}", value)
}

/// Write serializable rows with a header line
fn write_rows<R, W, I>(rows: I, writer: W) -> InsightsResult<()>
where
    R: Serialize,
    W: Write,
    I: IntoIterator<Item = R>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| InsightsError::Export(e.to_string()))?;
    Ok(())
}

#[derive(Serialize)]
struct PeriodRow {
    period: Period,
    label: String,
}

/// Export a period catalog
pub fn export_periods_csv<W: Write>(periods: &[Period], writer: W) -> InsightsResult<()> {
    write_rows(
        periods.iter().map(|p| PeriodRow {
            period: *p,
            label: p.long_name(),
        }),
        writer,
    )
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    category: &'a str,
    total: String,
    percentage: String,
}

/// Export category totals with percentage shares
pub fn export_category_shares_csv<W: Write>(
    shares: &[CategoryShare],
    writer: W,
) -> InsightsResult<()> {
    write_rows(
        shares.iter().map(|s| CategoryRow {
            category: &s.category_name,
            total: amount(s.total),
            percentage: percent(s.percentage),
        }),
        writer,
    )
}

#[derive(Serialize)]
struct BudgetRow<'a> {
    status: &'static str,
    category: &'a str,
    budgeted: String,
    actual: String,
    variance: String,
    tips: &'a str,
}

/// Export budget misses; `under` and `over` share one table
pub fn export_budget_entries_csv<W: Write>(
    under: &[BudgetComparisonEntry],
    over: &[BudgetComparisonEntry],
    writer: W,
) -> InsightsResult<()> {
    let tagged = under
        .iter()
        .map(|e| (BudgetDirection::Under, e))
        .chain(over.iter().map(|e| (BudgetDirection::Over, e)));

    write_rows(
        tagged.map(|(direction, e)| BudgetRow {
            status: match direction {
                BudgetDirection::Under => "under",
                BudgetDirection::Over => "over",
            },
            category: &e.category_name,
            budgeted: amount(e.budgeted_amount),
            actual: amount(e.actual_amount),
            variance: amount(e.variance()),
            tips: &e.tips,
        }),
        writer,
    )
}

#[derive(Serialize)]
struct HotspotRow<'a> {
    rank: usize,
    category: &'a str,
    total: String,
    tips: &'a str,
}

/// Export hotspots in rank order
pub fn export_hotspots_csv<W: Write>(hotspots: &[Hotspot], writer: W) -> InsightsResult<()> {
    write_rows(
        hotspots.iter().enumerate().map(|(i, h)| HotspotRow {
            rank: i + 1,
            category: &h.category_name,
            total: amount(h.total_amount),
            tips: &h.tips,
        }),
        writer,
    )
}

#[derive(Serialize)]
struct TrendRow {
    period: Period,
    balance: String,
    savings_rate: String,
}

/// Export a trend, oldest period first
pub fn export_trend_csv<W: Write>(trend: &[MonthlySnapshot], writer: W) -> InsightsResult<()> {
    write_rows(
        trend.iter().map(|s| TrendRow {
            period: s.period,
            balance: amount(s.balance),
            savings_rate: percent(s.savings_rate),
        }),
        writer,
    )
}

#[derive(Serialize)]
struct RegisterRow<'a> {
    date: String,
    kind: String,
    category: &'a str,
    source: &'a str,
    amount: String,
}

/// Export register entries in their current order
pub fn export_register_csv<W: Write>(entries: &[RegisterEntry], writer: W) -> InsightsResult<()> {
    write_rows(
        entries.iter().map(|e| RegisterRow {
            date: e.date.format("%Y-%m-%d").to_string(),
            kind: e.kind.to_string(),
            category: &e.category_name,
            source: &e.source,
            amount: amount(e.amount),
        }),
        writer,
    )
}
