//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    extract::Json,
    tracker::{ExpenseTracker, lock_tracker},
    transaction::{Transaction, TransactionForm},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The tracker that stores the transactions.
    pub tracker: Arc<Mutex<ExpenseTracker>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with the created
/// transaction and 201 Created on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(form): Json<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let transaction = lock_tracker(&state.tracker)?
        .add_transaction(&form)
        .inspect_err(|error| tracing::debug!("Could not create transaction: {error}"))?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
