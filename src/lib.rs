//! budget-insights - Financial aggregation and reporting engine
//!
//! Turns a user's raw income and expense records into per-month category
//! totals, budget-versus-actual comparisons, top spending or earning
//! categories, and a multi-month balance and savings-rate trend.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (periods, money, categories, transactions, budgets)
//! - `ledger`: The `LedgerQuery` trait and an in-memory ledger loaded from JSON/YAML
//! - `reports`: Pure report computations over fetched rows
//! - `services`: Report orchestration (one fetch, then pure functions)
//! - `config`: Configuration and path management
//! - `export`: JSON, YAML and CSV sinks
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `insights` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_insights::config::Settings;
//! use budget_insights::ledger::InMemoryLedger;
//! use budget_insights::models::{Period, UserId};
//! use budget_insights::services::ReportService;
//!
//! let ledger = InMemoryLedger::load("ledger.json")?;
//! let settings = Settings::default();
//! let service = ReportService::new(&ledger, &settings);
//! let summary = service.summary(&UserId::new("alice"), Period::parse("2024-03")?)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{InsightsError, InsightsResult};
