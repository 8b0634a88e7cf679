//! Display formatting for terminal output
//!
//! Renders report results as plain-text tables for the CLI.

pub mod report;
pub mod tables;

pub use tables::{
    format_budget_performance, format_category_breakdown, format_dashboard, format_hotspots,
    format_periods, format_register, format_summary, format_trend,
};
