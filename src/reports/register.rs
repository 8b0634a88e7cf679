//! Transaction register
//!
//! Lists a period's transactions of one kind with an optional category
//! filter and a choice of ordering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{InsightsError, InsightsResult};
use crate::models::{Category, CategoryId, Money, Transaction, TransactionId, TransactionKind};

/// Register ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegisterSort {
    /// Most recent first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

impl RegisterSort {
    /// Parse a sort key such as `latest` or `amount-desc`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "latest" | "newest" => Some(Self::Latest),
            "oldest" => Some(Self::Oldest),
            "amount-desc" | "highest" => Some(Self::AmountDesc),
            "amount-asc" | "lowest" => Some(Self::AmountAsc),
            _ => None,
        }
    }

    fn sort(&self, entries: &mut [RegisterEntry]) {
        match self {
            Self::Latest => entries.sort_by(|a, b| b.date.cmp(&a.date)),
            Self::Oldest => entries.sort_by(|a, b| a.date.cmp(&b.date)),
            Self::AmountDesc => entries.sort_by(|a, b| b.amount.cmp(&a.amount)),
            Self::AmountAsc => entries.sort_by(|a, b| a.amount.cmp(&b.amount)),
        }
    }
}

impl fmt::Display for RegisterSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
        };
        write!(f, "{}", key)
    }
}

/// Filter options for the register
#[derive(Debug, Clone, Default)]
pub struct RegisterFilter {
    /// Only this category (name, case-insensitive)
    pub category_name: Option<String>,
}

impl RegisterFilter {
    /// Filter to a single category
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category_name: Some(name.into()),
        }
    }

    fn matches(&self, category: &Category) -> bool {
        match &self.category_name {
            Some(name) => category.name.eq_ignore_ascii_case(name.trim()),
            None => true,
        }
    }
}

/// A single register line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEntry {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_name: String,
    pub source: String,
    pub amount: Money,
}

/// Build the register for a set of transactions.
///
/// Sorting is stable, so entries with equal keys keep their ledger order.
pub fn register(
    transactions: &[Transaction],
    categories: &[Category],
    filter: &RegisterFilter,
    sort: RegisterSort,
) -> InsightsResult<Vec<RegisterEntry>> {
    let by_id: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut entries = Vec::new();
    for txn in transactions {
        let category = by_id
            .get(&txn.category_id)
            .ok_or_else(|| InsightsError::category_not_found(txn.category_id.to_string()))?;

        if !filter.matches(category) {
            continue;
        }

        entries.push(RegisterEntry {
            id: txn.id,
            date: txn.date,
            kind: txn.kind,
            category_name: category.name.clone(),
            source: txn.source.clone(),
            amount: txn.amount,
        });
    }

    sort.sort(&mut entries);
    Ok(entries)
}
