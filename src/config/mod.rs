//! Configuration module for budget-insights
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Report settings persistence

pub mod paths;
pub mod settings;

pub use paths::InsightsPaths;
pub use settings::Settings;
