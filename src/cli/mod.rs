//! CLI command handlers
//!
//! Bridges clap argument parsing with the report service.

pub mod report;

pub use report::{handle_report_command, resolve_user, KindArg, OutputFormat, ReportCommands, SortArg};
