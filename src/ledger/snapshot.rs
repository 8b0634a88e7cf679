//! Ledger snapshot documents
//!
//! A snapshot holds the shared category list plus each user's transactions
//! and budgets. It is validated as a whole on load, so every row the
//! engine later sees references a known category of the right kind.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use super::file_io::{read_document, write_document_atomic};
use crate::error::{InsightsError, InsightsResult};
use crate::models::{Budget, Category, CategoryId, Period, Transaction, UserId};

/// One user's rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserLedger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

/// Complete ledger contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Reference categories shared by every user
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Rows per user
    #[serde(default)]
    pub users: BTreeMap<UserId, UserLedger>,
}

impl LedgerSnapshot {
    /// Load and validate a snapshot from a `.json`, `.yaml` or `.yml` file
    pub fn load<P: AsRef<Path>>(path: P) -> InsightsResult<Self> {
        let path = path.as_ref();
        let snapshot: LedgerSnapshot = read_document(path)?;
        snapshot.validate()?;

        info!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            users = snapshot.users.len(),
            "loaded ledger snapshot"
        );

        Ok(snapshot)
    }

    /// Validate and write the snapshot
    pub fn save<P: AsRef<Path>>(&self, path: P) -> InsightsResult<()> {
        self.validate()?;
        write_document_atomic(path, self)
    }

    /// Users present in the snapshot, in order
    pub fn user_ids(&self) -> impl Iterator<Item = &UserId> {
        self.users.keys()
    }

    /// Check the invariants the engine relies on.
    ///
    /// - category names are valid and ids unique
    /// - amounts are non-negative
    /// - every row references a known category, and transactions match its kind
    /// - at most one budget per (user, category, period)
    pub fn validate(&self) -> InsightsResult<()> {
        let mut by_id: HashMap<CategoryId, &Category> = HashMap::new();
        for category in &self.categories {
            category
                .validate()
                .map_err(|e| InsightsError::Validation(format!("{}: {}", category.name, e)))?;
            if by_id.insert(category.id, category).is_some() {
                return Err(InsightsError::Validation(format!(
                    "Duplicate category id {}",
                    category.id
                )));
            }
        }

        for (user, ledger) in &self.users {
            for txn in &ledger.transactions {
                txn.validate().map_err(|e| {
                    InsightsError::Validation(format!("User {}: {} ({})", user, e, txn))
                })?;

                let category = by_id
                    .get(&txn.category_id)
                    .ok_or_else(|| InsightsError::category_not_found(txn.category_id.to_string()))?;

                if category.kind != txn.kind {
                    return Err(InsightsError::KindMismatch {
                        entity_type: "Transaction",
                        category: category.name.clone(),
                        expected: category.kind,
                        found: txn.kind,
                    });
                }
            }

            let mut seen: HashSet<(CategoryId, Period)> = HashSet::new();
            for budget in &ledger.budgets {
                budget.validate().map_err(|e| {
                    InsightsError::Validation(format!("User {}: {} ({})", user, e, budget))
                })?;

                let category = by_id
                    .get(&budget.category_id)
                    .ok_or_else(|| InsightsError::category_not_found(budget.category_id.to_string()))?;

                if !seen.insert((budget.category_id, budget.period)) {
                    return Err(InsightsError::Validation(format!(
                        "User {} has more than one budget for '{}' in {}",
                        user, category.name, budget.period
                    )));
                }
            }

            debug!(
                %user,
                transactions = ledger.transactions.len(),
                budgets = ledger.budgets.len(),
                "validated user ledger"
            );
        }

        Ok(())
    }
}
