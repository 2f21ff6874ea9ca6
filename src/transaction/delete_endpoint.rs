//! Defines the endpoints for deleting one or all transactions.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};

use crate::{
    AppState, Error,
    extract::Path,
    tracker::{ExpenseTracker, lock_tracker},
    transaction::TransactionId,
};

/// The state needed to delete transactions.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The tracker that stores the transactions.
    pub tracker: Arc<Mutex<ExpenseTracker>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with 204 No Content.
///
/// Deleting a transaction that does not exist succeeds without changing anything.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    lock_tracker(&state.tracker)?.delete_transaction(transaction_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for deleting every transaction, responds with 204 No Content.
pub async fn delete_all_transactions_endpoint(
    State(state): State<DeleteTransactionState>,
) -> Result<StatusCode, Error> {
    lock_tracker(&state.tracker)?.delete_all()?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::delete};
    use axum_test::TestServer;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{expense_form, new_test_tracker},
        transaction::delete_endpoint::{
            DeleteTransactionState, delete_all_transactions_endpoint, delete_transaction_endpoint,
        },
    };

    fn get_test_server(state: DeleteTransactionState) -> TestServer {
        let app = Router::new()
            .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
            .route(
                endpoints::TRANSACTIONS,
                delete(delete_all_transactions_endpoint),
            )
            .with_state(state);

        TestServer::new(app)
    }

    fn get_test_state_with_transactions(count: usize) -> DeleteTransactionState {
        let tracker = new_test_tracker();
        for day in 1..=count {
            tracker
                .lock()
                .unwrap()
                .add_transaction(&expense_form(
                    1.0,
                    "Bus fare",
                    &format!("2024-03-{day:02}"),
                ))
                .unwrap();
        }

        DeleteTransactionState { tracker }
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let state = get_test_state_with_transactions(2);
        let id = state.tracker.lock().unwrap().transactions()[0].id;
        let server = get_test_server(state.clone());

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let tracker = state.tracker.lock().unwrap();
        assert_eq!(tracker.transactions().len(), 1);
        assert_ne!(tracker.transactions()[0].id, id);
    }

    #[tokio::test]
    async fn deleting_missing_transaction_succeeds() {
        let state = get_test_state_with_transactions(1);
        let server = get_test_server(state.clone());

        server
            .delete(&format_endpoint(endpoints::TRANSACTION, 42))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert_eq!(state.tracker.lock().unwrap().transactions().len(), 1);
    }

    #[tokio::test]
    async fn deletes_all_transactions() {
        let state = get_test_state_with_transactions(3);
        let server = get_test_server(state.clone());

        server
            .delete(endpoints::TRANSACTIONS)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert!(state.tracker.lock().unwrap().transactions().is_empty());
    }
}
