//! Transaction totals for the summary cards, the list footer and the charts.
//!
//! All functions are pure and take the transactions to aggregate as a slice of
//! references so they work equally well on the full collection and on the
//! output of [crate::filter::apply].

use std::{
    collections::{BTreeMap, HashSet},
    ops::Index,
};

use serde::Serialize;
use time::Month;

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

/// Income and expense totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all income.
    pub total_income: f64,
    /// The sum of all expenses.
    pub total_expense: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The sum of income in the month.
    pub income: f64,
    /// The sum of expenses in the month.
    pub expense: f64,
}

/// Twelve monthly buckets indexed from 0 (January) to 11 (December).
///
/// Transactions from different years are added to the same bucket, e.g.
/// January 2023 and January 2024 are both counted under January.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyTotals([MonthlyTotal; 12]);

impl MonthlyTotals {
    /// The totals for `month`.
    pub fn month(&self, month: Month) -> MonthlyTotal {
        self.0[month_index(month)]
    }

    /// The totals for each month, January first.
    pub fn iter(&self) -> impl Iterator<Item = &MonthlyTotal> {
        self.0.iter()
    }
}

impl Index<usize> for MonthlyTotals {
    type Output = MonthlyTotal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Statistics about the whole collection shown in the page footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterStats {
    /// The number of transactions.
    pub total_transactions: usize,
    /// The number of distinct days that have at least one transaction.
    pub days_tracked: usize,
}

/// Sum income and expenses.
pub fn summary(transactions: &[&Transaction]) -> Summary {
    let mut summary = Summary::default();

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => summary.total_income += transaction.amount,
            TransactionType::Expense => summary.total_expense += transaction.amount,
        }
    }

    summary.net = summary.total_income - summary.total_expense;

    summary
}

/// Sum expenses by category.
///
/// Income is ignored and categories without any expenses are left out.
pub fn expense_by_category(transactions: &[&Transaction]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        *totals.entry(transaction.category).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Sum income and expenses by calendar month, ignoring the year.
///
/// Transactions with a malformed date are skipped.
pub fn monthly_totals(transactions: &[&Transaction]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();

    for transaction in transactions {
        let Some(date) = transaction.calendar_date() else {
            continue;
        };

        let bucket = &mut totals.0[month_index(date.month())];
        match transaction.transaction_type {
            TransactionType::Income => bucket.income += transaction.amount,
            TransactionType::Expense => bucket.expense += transaction.amount,
        }
    }

    totals
}

/// Income minus expenses, shown as the total under the transaction list.
pub fn filtered_total(transactions: &[&Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| match transaction.transaction_type {
            TransactionType::Income => transaction.amount,
            TransactionType::Expense => -transaction.amount,
        })
        .sum()
}

/// Count the transactions and the distinct days they happened on.
///
/// Transactions with a malformed date are counted as transactions but not as
/// a tracked day.
pub fn footer_stats(transactions: &[&Transaction]) -> FooterStats {
    let days: HashSet<_> = transactions
        .iter()
        .filter_map(|transaction| transaction.calendar_date())
        .collect();

    FooterStats {
        total_transactions: transactions.len(),
        days_tracked: days.len(),
    }
}

/// Three-letter month labels, January first.
pub(super) const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_index(month: Month) -> usize {
    month as usize - 1
}
