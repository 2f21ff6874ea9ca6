//! Exporting every transaction as a downloadable JSON document.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    tracker::{ExpenseTracker, lock_tracker},
    transaction::Transaction,
};

/// The format version written to every export.
pub const EXPORT_VERSION: &str = "1.0";

/// A snapshot of every transaction at the time of export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// The transactions in store order, newest first.
    pub transactions: Vec<Transaction>,
    /// When the export was made.
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
    /// The format version, see [EXPORT_VERSION].
    pub version: String,
}

impl ExportDocument {
    /// Create an export of `transactions` made at `exported_at`.
    pub fn new(transactions: Vec<Transaction>, exported_at: OffsetDateTime) -> Self {
        Self {
            transactions,
            exported_at,
            version: EXPORT_VERSION.to_owned(),
        }
    }

    /// The suggested file name, e.g. "expense-tracker-2024-01-31.json".
    pub fn file_name(&self) -> String {
        format!("expense-tracker-{}.json", self.exported_at.date())
    }

    /// The document as pretty printed JSON.
    ///
    /// # Errors
    /// Returns an [Error::JSONSerializationError] if the document cannot be serialized.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))
    }
}

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The tracker holding the transactions.
    pub tracker: Arc<Mutex<ExpenseTracker>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
        }
    }
}

/// A route handler that responds with every transaction as a JSON file download.
pub async fn export_endpoint(State(state): State<ExportState>) -> Result<Response, Error> {
    let document = lock_tracker(&state.tracker)?.export(OffsetDateTime::now_utc());
    let body = document.to_json_pretty()?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());

    tracing::info!(
        "Exporting {} transactions as {}",
        document.transactions.len(),
        document.file_name()
    );

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
