//! Hotspot selection
//!
//! Picks the categories with the largest totals in a period and attaches
//! their guidance text.

use serde::{Deserialize, Serialize};

use crate::models::{Money, TipsByCategory};

use super::category_totals::CategoryTotal;

/// Number of hotspots shown when none is configured
pub const DEFAULT_HOTSPOT_COUNT: usize = 3;

/// A top-ranked category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Category name
    pub category_name: String,
    /// Total for the period
    pub total_amount: Money,
    /// Category guidance text (empty when the category has none)
    pub tips: String,
}

/// The `n` largest totals, descending.
///
/// Equal totals keep their input order. Fewer than `n` categories yield a
/// shorter list; the result is never padded.
pub fn top_n(totals: &[CategoryTotal], n: usize, tips: &TipsByCategory) -> Vec<Hotspot> {
    let mut ranked: Vec<&CategoryTotal> = totals.iter().collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));

    ranked
        .into_iter()
        .take(n)
        .map(|t| Hotspot {
            category_name: t.category_name.clone(),
            total_amount: t.total,
            tips: tips.get(&t.category_id).cloned().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{tips_by_category, Category, Transaction, TransactionKind};
    use crate::reports::category_totals::aggregate;
    use chrono::NaiveDate;

    fn setup(amounts: &[i64]) -> (Vec<Category>, Vec<CategoryTotal>) {
        let categories: Vec<Category> = amounts
            .iter()
            .enumerate()
            .map(|(i, _)| {
                Category::with_tips(
                    format!("Category {}", i),
                    TransactionKind::Expense,
                    format!("Tip {}", i),
                )
            })
            .collect();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let transactions: Vec<Transaction> = categories
            .iter()
            .zip(amounts)
            .map(|(c, cents)| {
                Transaction::new(TransactionKind::Expense, c.id, date, Money::from_cents(*cents))
            })
            .collect();
        let totals = aggregate(&transactions, &categories).unwrap();
        (categories, totals)
    }

    #[test]
    fn test_top_three_is_prefix_of_ranking() {
        let (categories, totals) = setup(&[100, 500, 300, 400, 200]);
        let tips = tips_by_category(&categories);

        let hotspots = top_n(&totals, 3, &tips);

        assert_eq!(hotspots.len(), 3);
        for (hotspot, total) in hotspots.iter().zip(&totals) {
            assert_eq!(hotspot.category_name, total.category_name);
            assert_eq!(hotspot.total_amount, total.total);
        }
        assert_eq!(hotspots[0].category_name, "Category 1");
        assert_eq!(hotspots[0].tips, "Tip 1");
    }

    #[test]
    fn test_fewer_categories_than_n() {
        let (categories, totals) = setup(&[100, 200]);
        let tips = tips_by_category(&categories);
        assert_eq!(top_n(&totals, DEFAULT_HOTSPOT_COUNT, &tips).len(), 2);
        assert!(top_n(&totals, 0, &tips).is_empty());
    }

    #[test]
    fn test_unsorted_input_is_ranked() {
        let (categories, mut totals) = setup(&[100, 300, 200]);
        totals.reverse();
        let tips = tips_by_category(&categories);
        let hotspots = top_n(&totals, 2, &tips);
        let amounts: Vec<_> = hotspots.iter().map(|h| h.total_amount.cents()).collect();
        assert_eq!(amounts, vec![300, 200]);
    }

    #[test]
    fn test_missing_tips_become_empty() {
        let (_, totals) = setup(&[100]);
        let hotspots = top_n(&totals, 3, &TipsByCategory::new());
        assert_eq!(hotspots[0].tips, "");
    }
}
