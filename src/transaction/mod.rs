//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionForm` that raw client input is parsed from
//! - Route handlers for creating, editing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;

pub use core::{
    MIN_DESCRIPTION_LENGTH, Transaction, TransactionBuilder, TransactionId, TransactionType,
    parse_date,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{delete_all_transactions_endpoint, delete_transaction_endpoint};
pub use edit_endpoint::edit_transaction_endpoint;
pub use form::{AmountField, TransactionForm};
