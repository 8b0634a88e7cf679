//! Core data models for budget-insights
//!
//! This module contains the value types the reporting engine reads:
//! categories, transactions, budgets, periods and money.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::Budget;
pub use category::{tips_by_category, Category, TipsByCategory, TransactionKind};
pub use ids::{CategoryId, TransactionId, UserId};
pub use money::Money;
pub use period::{Period, PeriodParseError, PeriodRange};
pub use transaction::Transaction;
