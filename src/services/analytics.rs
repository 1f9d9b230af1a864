//! Summary analytics
//!
//! Derives the dashboard totals from a record collection. The computation is
//! pure and recomputed from scratch on every call; amounts are summed in the
//! order the records are given.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Amount, Category, Record, RecordKind};

/// Aggregate totals over a record collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of income amounts
    pub total_income: Amount,
    /// Sum of expense amounts
    pub total_expenses: Amount,
    /// Income minus expenses, may be negative
    pub net_income: Amount,
    /// Expense sums per category; categories without expenses are absent
    pub category_spending: BTreeMap<Category, Amount>,
    /// Number of records of any kind
    pub transaction_count: usize,
}

/// One row of the spending breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Amount,
    /// Percentage of total expenses
    pub percentage: f64,
}

impl Summary {
    /// Compute the summary of `records`
    pub fn compute(records: &[Record]) -> Self {
        let mut total_income = Amount::zero();
        let mut total_expenses = Amount::zero();
        let mut category_spending: BTreeMap<Category, Amount> = BTreeMap::new();

        for record in records {
            match record.kind {
                RecordKind::Income => total_income += record.amount,
                RecordKind::Expense => {
                    total_expenses += record.amount;
                    *category_spending
                        .entry(record.category)
                        .or_insert_with(Amount::zero) += record.amount;
                }
            }
        }

        debug!(
            records = records.len(),
            categories = category_spending.len(),
            "Recomputed summary"
        );

        Self {
            total_income,
            total_expenses,
            net_income: total_income - total_expenses,
            category_spending,
            transaction_count: records.len(),
        }
    }

    /// Share of total expenses taken by `category`, in percent
    pub fn category_share(&self, category: Category) -> f64 {
        let spent = self
            .category_spending
            .get(&category)
            .copied()
            .unwrap_or_default();
        percentage(spent, self.total_expenses)
    }

    /// The `limit` categories with the highest spending, largest first
    ///
    /// Equal amounts keep the fixed category order.
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = self
            .category_spending
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: *category,
                amount: *amount,
                percentage: percentage(*amount, self.total_expenses),
            })
            .collect();

        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares.truncate(limit);
        shares
    }

    /// Whether there is anything to show
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

fn percentage(part: Amount, total: Amount) -> f64 {
    if total.is_positive() {
        part.value() / total.value() * 100.0
    } else {
        0.0
    }
}
