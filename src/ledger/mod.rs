//! Ledger access for budget-insights
//!
//! [`LedgerQuery`] is the boundary between the reporting engine and
//! whatever stores the raw rows. The engine only ever asks for rows of one
//! user and one kind, optionally scoped to a range of periods.
//! [`InMemoryLedger`] implements it over a [`LedgerSnapshot`] file.

pub mod file_io;
pub mod memory;
pub mod snapshot;

pub use file_io::{read_document, write_document_atomic, DocumentFormat};
pub use memory::InMemoryLedger;
pub use snapshot::{LedgerSnapshot, UserLedger};

use chrono::NaiveDate;

use crate::error::InsightsResult;
use crate::models::{Budget, Category, PeriodRange, Transaction, TransactionKind, UserId};

/// Row queries the reporting engine needs
///
/// Implementations return rows in a stable order. A user without any rows
/// is not an error: every query simply comes back empty.
pub trait LedgerQuery {
    /// Reference categories of one kind, in stable order
    fn categories(&self, kind: TransactionKind) -> InsightsResult<Vec<Category>>;

    /// A user's transactions of one kind dated within `range` (inclusive)
    fn transactions(
        &self,
        user: &UserId,
        kind: TransactionKind,
        range: PeriodRange,
    ) -> InsightsResult<Vec<Transaction>>;

    /// Every transaction of one kind the user ever recorded
    fn all_transactions(
        &self,
        user: &UserId,
        kind: TransactionKind,
    ) -> InsightsResult<Vec<Transaction>>;

    /// A user's budgets for categories of one kind within `range`
    fn budgets(
        &self,
        user: &UserId,
        kind: TransactionKind,
        range: PeriodRange,
    ) -> InsightsResult<Vec<Budget>>;

    /// Dates of every transaction of one kind, feeding the period catalog
    fn activity_dates(&self, user: &UserId, kind: TransactionKind) -> InsightsResult<Vec<NaiveDate>> {
        Ok(self
            .all_transactions(user, kind)?
            .into_iter()
            .map(|t| t.date)
            .collect())
    }
}
