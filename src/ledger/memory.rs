//! In-memory ledger
//!
//! Serves [`LedgerQuery`] from a validated [`LedgerSnapshot`]. Mutations go
//! through the same invariants the snapshot enforces on load.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use tracing::trace;

use super::snapshot::{LedgerSnapshot, UserLedger};
use super::LedgerQuery;
use crate::error::{InsightsError, InsightsResult};
use crate::models::{
    Budget, Category, CategoryId, PeriodRange, Transaction, TransactionKind, UserId,
};

/// Ledger held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    snapshot: LedgerSnapshot,
    kinds: HashMap<CategoryId, TransactionKind>,
}

impl InMemoryLedger {
    /// An empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a snapshot after validating it
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> InsightsResult<Self> {
        snapshot.validate()?;
        let kinds = snapshot.categories.iter().map(|c| (c.id, c.kind)).collect();
        Ok(Self { snapshot, kinds })
    }

    /// Load a snapshot file
    pub fn load<P: AsRef<Path>>(path: P) -> InsightsResult<Self> {
        Self::from_snapshot(LedgerSnapshot::load(path)?)
    }

    /// The underlying snapshot
    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    /// Whether the user has any rows
    pub fn has_user(&self, user: &UserId) -> bool {
        self.snapshot.users.contains_key(user)
    }

    /// Fail with a not-found error for users without any rows
    pub fn require_user(&self, user: &UserId) -> InsightsResult<()> {
        if self.has_user(user) {
            Ok(())
        } else {
            Err(InsightsError::user_not_found(user.as_str()))
        }
    }

    /// Register a reference category
    pub fn add_category(&mut self, category: Category) -> InsightsResult<CategoryId> {
        category
            .validate()
            .map_err(|e| InsightsError::Validation(e.to_string()))?;
        if self.kinds.contains_key(&category.id) {
            return Err(InsightsError::Validation(format!(
                "Duplicate category id {}",
                category.id
            )));
        }

        let id = category.id;
        self.kinds.insert(id, category.kind);
        self.snapshot.categories.push(category);
        Ok(id)
    }

    /// Record a transaction for a user
    pub fn add_transaction(&mut self, user: &UserId, txn: Transaction) -> InsightsResult<()> {
        txn.validate()
            .map_err(|e| InsightsError::Validation(e.to_string()))?;
        let expected = self.kind_of(txn.category_id)?;
        if expected != txn.kind {
            return Err(InsightsError::KindMismatch {
                entity_type: "Transaction",
                category: self.category_name(txn.category_id),
                expected,
                found: txn.kind,
            });
        }

        self.user_mut(user).transactions.push(txn);
        Ok(())
    }

    /// Set a user's budget, replacing any budget for the same category and period
    pub fn set_budget(&mut self, user: &UserId, budget: Budget) -> InsightsResult<()> {
        budget
            .validate()
            .map_err(|e| InsightsError::Validation(e.to_string()))?;
        self.kind_of(budget.category_id)?;

        let budgets = &mut self.user_mut(user).budgets;
        match budgets
            .iter_mut()
            .find(|b| b.category_id == budget.category_id && b.period == budget.period)
        {
            Some(existing) => existing.amount = budget.amount,
            None => budgets.push(budget),
        }
        Ok(())
    }

    fn kind_of(&self, id: CategoryId) -> InsightsResult<TransactionKind> {
        self.kinds
            .get(&id)
            .copied()
            .ok_or_else(|| InsightsError::category_not_found(id.to_string()))
    }

    fn category_name(&self, id: CategoryId) -> String {
        self.snapshot
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn user_mut(&mut self, user: &UserId) -> &mut UserLedger {
        self.snapshot.users.entry(user.clone()).or_default()
    }

    fn user_rows(&self, user: &UserId) -> Option<&UserLedger> {
        self.snapshot.users.get(user)
    }

    fn is_kind(&self, id: CategoryId, kind: TransactionKind) -> bool {
        self.kinds.get(&id) == Some(&kind)
    }
}

impl LedgerQuery for InMemoryLedger {
    fn categories(&self, kind: TransactionKind) -> InsightsResult<Vec<Category>> {
        Ok(self
            .snapshot
            .categories
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect())
    }

    fn transactions(
        &self,
        user: &UserId,
        kind: TransactionKind,
        range: PeriodRange,
    ) -> InsightsResult<Vec<Transaction>> {
        let rows: Vec<Transaction> = self
            .user_rows(user)
            .map(|ledger| {
                ledger
                    .transactions
                    .iter()
                    .filter(|t| t.kind == kind && range.contains_date(t.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        trace!(%user, %kind, %range, rows = rows.len(), "fetched transactions");
        Ok(rows)
    }

    fn all_transactions(
        &self,
        user: &UserId,
        kind: TransactionKind,
    ) -> InsightsResult<Vec<Transaction>> {
        Ok(self
            .user_rows(user)
            .map(|ledger| {
                ledger
                    .transactions
                    .iter()
                    .filter(|t| t.kind == kind)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn budgets(
        &self,
        user: &UserId,
        kind: TransactionKind,
        range: PeriodRange,
    ) -> InsightsResult<Vec<Budget>> {
        let rows: Vec<Budget> = self
            .user_rows(user)
            .map(|ledger| {
                ledger
                    .budgets
                    .iter()
                    .filter(|b| range.contains(b.period) && self.is_kind(b.category_id, kind))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        trace!(%user, %kind, %range, rows = rows.len(), "fetched budgets");
        Ok(rows)
    }

    fn activity_dates(&self, user: &UserId, kind: TransactionKind) -> InsightsResult<Vec<NaiveDate>> {
        Ok(self
            .user_rows(user)
            .map(|ledger| {
                ledger
                    .transactions
                    .iter()
                    .filter(|t| t.kind == kind)
                    .map(|t| t.date)
                    .collect()
            })
            .unwrap_or_default())
    }
}
