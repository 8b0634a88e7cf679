//! Category aggregation
//!
//! Groups a period's transactions by category, zero-filling every known
//! category, and ranks the totals. Percentage shares are derived from the
//! ranked totals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{InsightsError, InsightsResult};
use crate::models::{Category, CategoryId, Money, Transaction};

/// Total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Category ID
    pub category_id: CategoryId,
    /// Category name
    pub category_name: String,
    /// Sum of transaction amounts (zero when nothing was recorded)
    pub total: Money,
}

/// Category total with its share of the grand total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// Category ID
    pub category_id: CategoryId,
    /// Category name
    pub category_name: String,
    /// Sum of transaction amounts
    pub total: Money,
    /// Percentage of the grand total, two decimals
    pub percentage: f64,
}

/// Aggregate transactions into per-category totals.
///
/// Every category in `categories` appears exactly once, with zero when no
/// transaction references it. Results are sorted by total descending; equal
/// totals keep the order of `categories`.
///
/// A transaction referencing a category outside `categories`, or a category
/// of the other kind, is an input-consistency error. So is a category total
/// that overflows.
pub fn aggregate(
    transactions: &[Transaction],
    categories: &[Category],
) -> InsightsResult<Vec<CategoryTotal>> {
    let index: HashMap<CategoryId, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    let mut sums = vec![Money::zero(); categories.len()];

    for txn in transactions {
        let slot = *index
            .get(&txn.category_id)
            .ok_or_else(|| InsightsError::category_not_found(txn.category_id.to_string()))?;

        let category = &categories[slot];
        if category.kind != txn.kind {
            return Err(InsightsError::KindMismatch {
                entity_type: "Transaction",
                category: category.name.clone(),
                expected: category.kind,
                found: txn.kind,
            });
        }

        sums[slot] = sums[slot].checked_add(txn.amount).ok_or_else(|| {
            InsightsError::Validation(format!(
                "Total for category '{}' exceeds the supported range",
                category.name
            ))
        })?;
    }

    let mut totals: Vec<CategoryTotal> = categories
        .iter()
        .zip(sums)
        .map(|(category, total)| CategoryTotal {
            category_id: category.id,
            category_name: category.name.clone(),
            total,
        })
        .collect();

    // sort_by is stable, so ties keep category-list order
    totals.sort_by(|a, b| b.total.cmp(&a.total));

    debug!(
        transactions = transactions.len(),
        categories = categories.len(),
        zero_filled = totals.iter().filter(|t| t.total.is_zero()).count(),
        "aggregated category totals"
    );

    Ok(totals)
}

/// Sum of all totals
pub fn grand_total(totals: &[CategoryTotal]) -> Money {
    totals.iter().map(|t| t.total).sum()
}

/// Attach percentage shares to ranked totals.
///
/// Each share is `100 * total / sum(totals)` rounded half-up to two decimals.
/// When the sum is zero every share is zero.
pub fn percentage_shares(totals: &[CategoryTotal]) -> Vec<CategoryShare> {
    let whole = grand_total(totals);

    totals
        .iter()
        .map(|t| CategoryShare {
            category_id: t.category_id,
            category_name: t.category_name.clone(),
            total: t.total,
            percentage: t.total.percentage_of(whole),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn expense(category: &Category, cents: i64) -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            category.id,
            date(),
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_food_before_rent_with_zero_fill() {
        let rent = Category::new("Rent", TransactionKind::Expense);
        let food = Category::new("Food", TransactionKind::Expense);
        let categories = vec![rent.clone(), food.clone()];
        let transactions = vec![expense(&food, 5000), expense(&food, 3000)];

        let totals = aggregate(&transactions, &categories).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category_name, "Food");
        assert_eq!(totals[0].total, Money::from_cents(8000));
        assert_eq!(totals[1].category_name, "Rent");
        assert_eq!(totals[1].total, Money::zero());
    }

    #[test]
    fn test_entry_count_and_sum_preserved() {
        let categories: Vec<Category> = (0..5)
            .map(|i| Category::new(format!("Category {}", i), TransactionKind::Expense))
            .collect();
        let transactions: Vec<Transaction> = (0..12)
            .map(|i| expense(&categories[i % 3], (i as i64 + 1) * 125))
            .collect();

        let totals = aggregate(&transactions, &categories).unwrap();

        assert_eq!(totals.len(), categories.len());
        let expected: Money = transactions.iter().map(|t| t.amount).sum();
        assert_eq!(grand_total(&totals), expected);
    }

    #[test]
    fn test_ties_keep_category_order() {
        let a = Category::new("Zeta", TransactionKind::Expense);
        let b = Category::new("Alpha", TransactionKind::Expense);
        let c = Category::new("Mid", TransactionKind::Expense);
        let categories = vec![a.clone(), b.clone(), c.clone()];
        let transactions = vec![expense(&a, 100), expense(&b, 100)];

        let totals = aggregate(&transactions, &categories).unwrap();
        let names: Vec<_> = totals.iter().map(|t| t.category_name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_empty_transactions_zero_fill_everything() {
        let categories = vec![
            Category::new("Rent", TransactionKind::Expense),
            Category::new("Food", TransactionKind::Expense),
        ];
        let totals = aggregate(&[], &categories).unwrap();
        assert_eq!(totals.len(), 2);
        assert!(totals.iter().all(|t| t.total.is_zero()));
        assert_eq!(totals[0].category_name, "Rent");
    }

    #[test]
    fn test_unknown_category_is_error() {
        let rent = Category::new("Rent", TransactionKind::Expense);
        let stray = Category::new("Stray", TransactionKind::Expense);
        let err = aggregate(&[expense(&stray, 100)], &[rent]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_kind_mismatch_is_error() {
        let salary = Category::new("Salary", TransactionKind::Income);
        let err = aggregate(&[expense(&salary, 100)], &[salary.clone()]).unwrap_err();
        assert!(matches!(err, InsightsError::KindMismatch { .. }));
    }

    #[test]
    fn test_percentage_shares_sum_to_hundred() {
        let categories: Vec<Category> = ["A", "B", "C"]
            .iter()
            .map(|n| Category::new(*n, TransactionKind::Expense))
            .collect();
        let transactions = vec![
            expense(&categories[0], 100),
            expense(&categories[1], 100),
            expense(&categories[2], 100),
        ];

        let shares = percentage_shares(&aggregate(&transactions, &categories).unwrap());
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.02, "sum was {}", sum);
        assert!(shares.iter().all(|s| s.percentage == 33.33));
    }

    #[test]
    fn test_percentage_shares_all_zero_when_total_zero() {
        let categories = vec![
            Category::new("Rent", TransactionKind::Expense),
            Category::new("Food", TransactionKind::Expense),
        ];
        let shares = percentage_shares(&aggregate(&[], &categories).unwrap());
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_percentage_rounding() {
        let categories = vec![
            Category::new("Big", TransactionKind::Expense),
            Category::new("Small", TransactionKind::Expense),
        ];
        let transactions = vec![expense(&categories[0], 200), expense(&categories[1], 100)];
        let shares = percentage_shares(&aggregate(&transactions, &categories).unwrap());
        assert_eq!(shares[0].percentage, 66.67);
        assert_eq!(shares[1].percentage, 33.33);
    }

    #[test]
    fn test_wire_field_names() {
        let totals = aggregate(&[], &[Category::new("Rent", TransactionKind::Expense)]).unwrap();
        let json = serde_json::to_string(&totals[0]).unwrap();
        assert!(json.contains("\"categoryName\":\"Rent\""));
        assert!(json.contains("\"total\":0.0"));
    }

    #[test]
    fn test_overflowing_total_is_error() {
        let food = Category::new("Food", TransactionKind::Expense);
        let huge = i64::MAX / 2 + 1;
        let transactions = vec![expense(&food, huge), expense(&food, huge)];
        let err = aggregate(&transactions, &[food]).unwrap_err();
        assert!(matches!(err, InsightsError::Validation(ref msg) if msg.contains("Food")));
    }
}
