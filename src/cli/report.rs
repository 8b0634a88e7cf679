//! CLI commands for reports
//!
//! Parses report arguments, runs the report service and writes the result
//! in the requested format.

use clap::{Subcommand, ValueEnum};
use std::io::Write;
use tracing::debug;

use crate::config::Settings;
use crate::display;
use crate::error::{InsightsError, InsightsResult};
use crate::export;
use crate::ledger::InMemoryLedger;
use crate::models::{Period, TransactionKind, UserId};
use crate::reports::{RegisterFilter, RegisterSort};
use crate::services::ReportService;

/// Output format for report results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// CSV (tabular reports only)
    Csv,
}

/// Transaction kind argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Register ordering argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    #[default]
    Latest,
    Oldest,
    AmountDesc,
    AmountAsc,
}

impl From<SortArg> for RegisterSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Latest => RegisterSort::Latest,
            SortArg::Oldest => RegisterSort::Oldest,
            SortArg::AmountDesc => RegisterSort::AmountDesc,
            SortArg::AmountAsc => RegisterSort::AmountAsc,
        }
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List the periods with recorded activity, most recent first
    Periods {
        /// Only periods with activity of this kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Category totals with percentage shares
    #[command(alias = "breakdown")]
    Categories {
        /// Income or expense categories
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Period (YYYY-MM); defaults to the most recent period with activity
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Budget plans with under- and over-budget categories
    Budget {
        /// Period (YYYY-MM); defaults to the most recent period with activity
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Categories with the largest totals
    Hotspots {
        /// Income or expense categories
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Period (YYYY-MM); defaults to the most recent period with activity
        #[arg(short, long)]
        period: Option<Period>,

        /// Number of categories to show
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Balance and savings rate over recent periods
    Trend {
        /// Last period of the trend (YYYY-MM)
        #[arg(short, long)]
        period: Option<Period>,

        /// Number of periods in the window
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Hotspots, budget misses and trend for one period
    Summary {
        /// Period (YYYY-MM); defaults to the most recent period with activity
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Lifetime totals and the most recent transactions
    Dashboard,

    /// Transactions of one period
    #[command(alias = "transactions")]
    Register {
        /// Income or expense transactions
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Period (YYYY-MM); defaults to the most recent period with activity
        #[arg(short, long)]
        period: Option<Period>,

        /// Only this category (by name)
        #[arg(short, long)]
        category: Option<String>,

        /// Ordering
        #[arg(short, long, value_enum, default_value_t = SortArg::Latest)]
        sort: SortArg,
    },
}

impl ReportCommands {
    fn name(&self) -> &'static str {
        match self {
            Self::Periods { .. } => "periods",
            Self::Categories { .. } => "categories",
            Self::Budget { .. } => "budget",
            Self::Hotspots { .. } => "hotspots",
            Self::Trend { .. } => "trend",
            Self::Summary { .. } => "summary",
            Self::Dashboard => "dashboard",
            Self::Register { .. } => "register",
        }
    }
}

/// Pick the user to report on.
///
/// An explicit id must exist in the ledger. Without one, a ledger holding a
/// single user reports on that user, and an empty ledger reports on an
/// anonymous user with no rows.
pub fn resolve_user(ledger: &InMemoryLedger, requested: Option<&str>) -> InsightsResult<UserId> {
    if let Some(id) = requested {
        let user = UserId::new(id);
        ledger.require_user(&user)?;
        return Ok(user);
    }

    let users: Vec<&UserId> = ledger.snapshot().user_ids().collect();
    match users.as_slice() {
        [] => Ok(UserId::new("default")),
        [only] => Ok((*only).clone()),
        many => Err(InsightsError::Validation(format!(
            "Ledger holds {} users; choose one with --user",
            many.len()
        ))),
    }
}

fn csv_unavailable(report: &str) -> InsightsError {
    InsightsError::Export(format!(
        "CSV output is not available for the {} report; use text, json or yaml",
        report
    ))
}

/// Write a serializable result in a structured format, or its text view
fn emit<T, W, F>(
    writer: &mut W,
    format: OutputFormat,
    report: &str,
    data: &T,
    text: F,
    csv: Option<&dyn Fn(&mut W) -> InsightsResult<()>>,
) -> InsightsResult<()>
where
    T: serde::Serialize,
    W: Write,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Text => {
            writer.write_all(text().as_bytes())?;
            Ok(())
        }
        OutputFormat::Json => export::export_json(report, data, writer),
        OutputFormat::Yaml => export::export_yaml(report, data, writer),
        OutputFormat::Csv => match csv {
            Some(write_csv) => write_csv(writer),
            None => Err(csv_unavailable(report)),
        },
    }
}

/// Handle report commands
pub fn handle_report_command<W: Write>(
    ledger: &InMemoryLedger,
    settings: &Settings,
    user: &UserId,
    format: OutputFormat,
    cmd: ReportCommands,
    writer: &mut W,
) -> InsightsResult<()> {
    let service = ReportService::new(ledger, settings);
    let symbol = settings.currency_symbol.as_str();
    let report = cmd.name();
    debug!(%user, report, ?format, "running report command");

    match cmd {
        ReportCommands::Periods { kind } => {
            let periods = match kind {
                Some(kind) => service.kind_catalog(user, kind.into())?,
                None => service.period_catalog(user)?,
            };
            emit(
                writer,
                format,
                report,
                &periods,
                || display::format_periods(&periods),
                Some(&|w: &mut W| export::export_periods_csv(&periods, w)),
            )
        }

        ReportCommands::Categories { kind, period } => {
            let period = service.resolve_period(user, period)?;
            let breakdown = service.category_breakdown(user, kind.into(), period)?;
            emit(
                writer,
                format,
                report,
                &breakdown,
                || display::format_category_breakdown(&breakdown, symbol),
                Some(&|w: &mut W| export::export_category_shares_csv(&breakdown.categories, w)),
            )
        }

        ReportCommands::Budget { period } => {
            let period = service.resolve_period(user, period)?;
            let performance = service.budget_performance(user, period)?;
            emit(
                writer,
                format,
                report,
                &performance,
                || display::format_budget_performance(&performance, symbol),
                Some(&|w: &mut W| {
                    export::export_budget_entries_csv(
                        &performance.under_budget,
                        &performance.over_budget,
                        w,
                    )
                }),
            )
        }

        ReportCommands::Hotspots { kind, period, top } => {
            let kind: TransactionKind = kind.into();
            let period = service.resolve_period(user, period)?;
            let hotspots = service.hotspots(user, kind, period, top)?;
            emit(
                writer,
                format,
                report,
                &hotspots,
                || display::format_hotspots(kind, period, &hotspots, symbol),
                Some(&|w: &mut W| export::export_hotspots_csv(&hotspots, w)),
            )
        }

        ReportCommands::Trend { period, window } => {
            let period = service.resolve_period(user, period)?;
            let trend = service.trend(user, period, window)?;
            emit(
                writer,
                format,
                report,
                &trend,
                || display::format_trend(&trend, symbol),
                Some(&|w: &mut W| export::export_trend_csv(&trend, w)),
            )
        }

        ReportCommands::Summary { period } => {
            let period = service.resolve_period(user, period)?;
            let summary = service.summary(user, period)?;
            emit(
                writer,
                format,
                report,
                &summary,
                || display::format_summary(&summary, symbol),
                None,
            )
        }

        ReportCommands::Dashboard => {
            let dashboard = service.dashboard(user)?;
            emit(
                writer,
                format,
                report,
                &dashboard,
                || display::format_dashboard(&dashboard, symbol),
                None,
            )
        }

        ReportCommands::Register {
            kind,
            period,
            category,
            sort,
        } => {
            let period = service.resolve_period(user, period)?;
            let filter = RegisterFilter {
                category_name: category,
            };
            let entries = service.register(user, kind.into(), period, &filter, sort.into())?;
            emit(
                writer,
                format,
                report,
                &entries,
                || display::format_register(&entries, symbol),
                Some(&|w: &mut W| export::export_register_csv(&entries, w)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Category, Money, Transaction};
    use chrono::NaiveDate;

    fn ledger() -> (InMemoryLedger, UserId) {
        let mut ledger = InMemoryLedger::new();
        let user = UserId::new("alice");
        let salary = ledger
            .add_category(Category::new("Salary", TransactionKind::Income))
            .unwrap();
        let food = ledger
            .add_category(Category::with_tips("Food", TransactionKind::Expense, "Cook at home"))
            .unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        ledger
            .add_transaction(&user, Transaction::new(TransactionKind::Income, salary, date, Money::from_cents(200000)))
            .unwrap();
        ledger
            .add_transaction(&user, Transaction::new(TransactionKind::Expense, food, date, Money::from_cents(15000)))
            .unwrap();
        ledger
            .set_budget(&user, Budget::new(food, Period::new(2024, 3).unwrap(), Money::from_cents(10000)))
            .unwrap();
        (ledger, user)
    }

    fn run(format: OutputFormat, cmd: ReportCommands) -> InsightsResult<String> {
        let (ledger, user) = ledger();
        let settings = Settings::default();
        let mut output = Vec::new();
        handle_report_command(&ledger, &settings, &user, format, cmd, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_resolve_user() {
        let (mut ledger, user) = ledger();
        assert_eq!(resolve_user(&ledger, None).unwrap(), user);
        assert!(resolve_user(&ledger, Some("bob")).unwrap_err().is_not_found());

        let food = ledger.snapshot().categories[1].id;
        let bob = UserId::new("bob");
        ledger
            .set_budget(&bob, Budget::new(food, Period::new(2024, 1).unwrap(), Money::zero()))
            .unwrap();
        assert!(resolve_user(&ledger, None).is_err());
        assert_eq!(resolve_user(&ledger, Some("bob")).unwrap(), bob);

        let empty = InMemoryLedger::new();
        assert_eq!(resolve_user(&empty, None).unwrap(), UserId::new("default"));
    }

    #[test]
    fn test_budget_text() {
        let text = run(OutputFormat::Text, ReportCommands::Budget { period: None }).unwrap();
        assert!(text.contains("Budget: March 2024"));
        assert!(text.contains("Expenses over budget"));
        assert!(text.contains("tip: Cook at home"));
    }

    #[test]
    fn test_hotspots_json() {
        let output = run(
            OutputFormat::Json,
            ReportCommands::Hotspots {
                kind: KindArg::Expense,
                period: None,
                top: Some(1),
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["report"], "hotspots");
        assert_eq!(value["data"][0]["categoryName"], "Food");
        assert_eq!(value["data"][0]["totalAmount"], 150.0);
    }

    #[test]
    fn test_trend_csv() {
        let output = run(
            OutputFormat::Csv,
            ReportCommands::Trend {
                period: None,
                window: Some(2),
            },
        )
        .unwrap();
        assert_eq!(
            output,
            "period,balance,savings_rate\n2024-02,0.00,0.00\n2024-03,1850.00,92.50\n"
        );
    }

    #[test]
    fn test_summary_csv_unavailable() {
        let err = run(OutputFormat::Csv, ReportCommands::Summary { period: None }).unwrap_err();
        assert!(matches!(err, InsightsError::Export(_)));
    }
}
