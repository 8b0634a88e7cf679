//! Budget model
//!
//! A budgeted amount for one category in one period. For income categories
//! the amount is a target to reach; for expense categories it is a limit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::period::Period;

/// A budget for a specific category in a specific period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The category this budget is for
    pub category_id: CategoryId,

    /// The period the budget applies to
    pub period: Period,

    /// Budgeted amount
    pub amount: Money,
}

impl Budget {
    /// Create a new budget
    pub fn new(category_id: CategoryId, period: Period, amount: Money) -> Self {
        Self {
            category_id,
            period,
            amount,
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeBudget);
        }
        if self.amount > Money::MAX_INPUT {
            return Err(BudgetValidationError::AmountTooLarge);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} budgeted: {}", self.period, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeBudget,
    AmountTooLarge,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBudget => write!(f, "Budget amount cannot be negative"),
            Self::AmountTooLarge => write!(f, "Budget amount exceeds {}", Money::MAX_INPUT),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let period = Period::new(2025, 1).unwrap();
        let mut budget = Budget::new(CategoryId::new(), period, Money::from_cents(50000));
        assert!(budget.validate().is_ok());

        budget.amount = Money::from_cents(-100);
        assert_eq!(budget.validate(), Err(BudgetValidationError::NegativeBudget));

        budget.amount = Money::from_cents(Money::MAX_INPUT.cents() + 1);
        assert_eq!(budget.validate(), Err(BudgetValidationError::AmountTooLarge));
    }

    #[test]
    fn test_display() {
        let period = Period::new(2025, 1).unwrap();
        let budget = Budget::new(CategoryId::new(), period, Money::from_cents(50000));
        assert_eq!(budget.to_string(), "2025-01 budgeted: $500.00");
    }

    #[test]
    fn test_serialization() {
        let period = Period::new(2025, 1).unwrap();
        let budget = Budget::new(CategoryId::new(), period, Money::from_cents(50000));
        let json = serde_json::to_string(&budget).unwrap();
        assert!(json.contains("\"period\":\"2025-01\""));
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget, deserialized);
    }
}
