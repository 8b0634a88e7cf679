//! Transaction model
//!
//! A single income or expense entry. Amounts are always non-negative; the
//! direction of money is carried by the transaction kind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::TransactionKind;
use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::period::Period;

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    #[serde(default)]
    pub id: TransactionId,

    /// Non-negative amount
    pub amount: Money,

    /// Date the transaction was recorded
    pub date: NaiveDate,

    /// Category the transaction is filed under
    pub category_id: CategoryId,

    /// Income or expense
    pub kind: TransactionKind,

    /// Free-text source or payee
    #[serde(default)]
    pub source: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        kind: TransactionKind,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            date,
            category_id,
            kind,
            source: String::new(),
        }
    }

    /// Create a transaction with a source description
    pub fn with_source(
        kind: TransactionKind,
        category_id: CategoryId,
        date: NaiveDate,
        amount: Money,
        source: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(kind, category_id, date, amount);
        txn.source = source.into();
        txn
    }

    /// The period this transaction falls in
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        if self.amount > Money::MAX_INPUT {
            return Err(TransactionValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.kind, self.amount)?;
        if !self.source.is_empty() {
            write!(f, " ({})", self.source)?;
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount,
    AmountTooLarge,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Transaction amount cannot be negative"),
            Self::AmountTooLarge => write!(f, "Transaction amount exceeds {}", Money::MAX_INPUT),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
