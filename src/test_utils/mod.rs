#![allow(missing_docs)]

pub(crate) mod http;

use std::sync::{Arc, Mutex};

pub(crate) use http::{assert_content_type, get_header};

use crate::{
    persistence::{MemoryStore, TransactionGateway},
    tracker::{ExpenseTracker, TrackerConfig},
    transaction::{AmountField, TransactionForm},
};

/// A shared tracker backed by an empty in-memory store.
pub(crate) fn new_test_tracker() -> Arc<Mutex<ExpenseTracker>> {
    let tracker = ExpenseTracker::load(
        TransactionGateway::new(MemoryStore::new()),
        TrackerConfig::default(),
    )
    .expect("could not create test tracker");

    Arc::new(Mutex::new(tracker))
}

/// A valid form for a food expense.
pub(crate) fn expense_form(amount: f64, description: &str, date: &str) -> TransactionForm {
    transaction_form("expense", amount, description, date, "food")
}

/// A valid form for freelance income.
pub(crate) fn income_form(amount: f64, description: &str, date: &str) -> TransactionForm {
    transaction_form("income", amount, description, date, "freelance")
}

fn transaction_form(
    transaction_type: &str,
    amount: f64,
    description: &str,
    date: &str,
    category: &str,
) -> TransactionForm {
    TransactionForm {
        transaction_type: Some(transaction_type.to_owned()),
        amount: Some(AmountField::Number(amount)),
        description: Some(description.to_owned()),
        date: Some(date.to_owned()),
        category: Some(category.to_owned()),
    }
}
