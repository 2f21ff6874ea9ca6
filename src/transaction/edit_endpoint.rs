//! Defines the endpoint for replacing the details of a transaction.
use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};

use crate::{
    AppState, Error,
    extract::{Json, Path},
    tracker::{ExpenseTracker, lock_tracker},
    transaction::{Transaction, TransactionForm, TransactionId},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The tracker that stores the transactions.
    pub tracker: Arc<Mutex<ExpenseTracker>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
        }
    }
}

/// A route handler for replacing the details of a transaction, responds with
/// the updated transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(form): Json<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    lock_tracker(&state.tracker)?
        .update_transaction(transaction_id, &form)
        .inspect_err(|error| {
            tracing::debug!("Could not update transaction {transaction_id}: {error}")
        })
        .map(Json)
}
