//! Export module for budget-insights
//!
//! Result sinks for computed reports:
//! - JSON: machine-readable, wrapped in a versioned envelope
//! - YAML: human-readable, same envelope
//! - CSV: tabular reports only (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{
    export_budget_entries_csv, export_category_shares_csv, export_hotspots_csv,
    export_periods_csv, export_register_csv, export_trend_csv,
};
pub use json::{export_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
