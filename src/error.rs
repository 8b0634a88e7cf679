//! Custom error types for budget-insights
//!
//! This module defines the error hierarchy for the engine and its ambient
//! layers using thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::models::{Period, TransactionKind};

/// The main error type for budget-insights operations
#[derive(Error, Debug)]
pub enum InsightsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A date or period string could not be turned into a period
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Trend window must hold at least one period
    #[error("Invalid trend window size: {0} (must be at least 1)")]
    InvalidWindow(usize),

    /// Trend target period has no activity in the supplied history
    #[error("Period {0} is not present in the activity history")]
    PeriodNotInHistory(Period),

    /// A row references a category of the other kind
    #[error("{entity_type} is {found} but category '{category}' is {expected}")]
    KindMismatch {
        entity_type: &'static str,
        category: String,
        expected: TransactionKind,
        found: TransactionKind,
    },

    /// Storage (ledger snapshot) errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl InsightsError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an input-consistency fault raised by the engine
    pub fn is_input_consistency(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidPeriod(_)
                | Self::InvalidWindow(_)
                | Self::PeriodNotInHistory(_)
                | Self::KindMismatch { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for InsightsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InsightsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for InsightsError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for InsightsError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for budget-insights operations
pub type InsightsResult<T> = Result<T, InsightsError>;
