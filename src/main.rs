use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use budget_insights::cli::{handle_report_command, resolve_user, OutputFormat, ReportCommands};
use budget_insights::config::{InsightsPaths, Settings};
use budget_insights::ledger::InMemoryLedger;
use budget_insights::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "insights",
    author = "Kaylee Beyene",
    version,
    about = "Financial aggregation and reporting for income/expense ledgers",
    long_about = "budget-insights reads an income/expense ledger and reports \
                  category breakdowns, budget misses, spending hotspots and \
                  balance trends per calendar month."
)]
struct Cli {
    /// Ledger file (.json, .yaml or .yml)
    #[arg(long, global = true, env = "BUDGET_INSIGHTS_LEDGER")]
    ledger: Option<PathBuf>,

    /// User to report on
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = InsightsPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ledger_path = cli.ledger.unwrap_or_else(|| paths.ledger_file());

    match cli.command {
        Commands::Report(cmd) => {
            let ledger = InMemoryLedger::load(&ledger_path)
                .with_context(|| format!("Failed to load ledger {}", ledger_path.display()))?;
            let user = resolve_user(&ledger, cli.user.as_deref())?;
            info!(%user, ledger = %ledger_path.display(), "ledger loaded");

            let stdout = io::stdout();
            let mut out = stdout.lock();
            handle_report_command(&ledger, &settings, &user, cli.format, cmd, &mut out)?;
            out.flush()?;
        }
        Commands::Config => {
            println!("budget-insights Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger file:      {}", ledger_path.display());
            println!();
            println!("Settings:");
            println!("  Hotspot count:       {}", settings.hotspot_count);
            println!("  Trend window:        {}", settings.trend_window);
            println!("  Recent transactions: {}", settings.recent_transaction_count);
            println!("  Currency symbol:     {}", settings.currency_symbol);
        }
    }

    Ok(())
}
