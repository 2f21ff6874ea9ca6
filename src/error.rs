//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::transaction::TransactionType;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user tried to create or edit a transaction with invalid details.
    ///
    /// Nothing is stored when this error is returned.
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    /// The transaction collection could not be read from or written to storage.
    ///
    /// When this is returned from a mutation, the change has been applied in
    /// memory but has not been saved.
    #[error("could not access storage: {0}")]
    Persistence(#[from] PersistenceError),

    /// The request body or path could not be read, e.g. malformed JSON or a
    /// field of the wrong type.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// The status code for the rejection.
        status: StatusCode,
        /// What was wrong with the request.
        message: String,
    },

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the lock on the tracker state.
    #[error("could not acquire the tracker lock")]
    TrackerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

/// The ways that transaction details can be invalid.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The amount could not be read as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was zero, negative or not finite.
    #[error("amount must be greater than 0, got {0}")]
    NonPositiveAmount(f64),

    /// The description had fewer than [crate::transaction::MIN_DESCRIPTION_LENGTH] characters.
    #[error("description must be at least {min} characters, got {actual}")]
    DescriptionTooShort {
        /// The minimum number of characters.
        min: usize,
        /// The number of characters after trimming.
        actual: usize,
    },

    /// The date was not a valid calendar date in the format YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The transaction type was neither income nor expense.
    #[error("\"{0}\" is not a valid transaction type, expected income or expense")]
    UnknownTransactionType(String),

    /// The category is not in the catalog.
    #[error("\"{0}\" is not a known category")]
    UnknownCategory(String),

    /// The category is in the catalog, but not for the transaction's type.
    #[error("the category \"{category}\" cannot be used for {transaction_type} transactions")]
    CategoryMismatch {
        /// The category that was given.
        category: String,
        /// The type of the transaction.
        transaction_type: TransactionType,
    },
}

/// The ways that reading or writing the stored transactions can fail.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum PersistenceError {
    /// The storage medium could not be read or written, e.g. missing
    /// permissions or a full disk.
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    /// The stored data is not a valid list of transactions.
    #[error("stored transactions are corrupt: {0}")]
    Corrupt(String),

    /// The transactions could not be serialized.
    #[error("could not serialize transactions: {0}")]
    Serialization(String),
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A short summary of what went wrong.
    pub error: String,
    /// What the client can do about it.
    pub details: String,
}

impl Error {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            Error::Validation(error) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "Invalid transaction".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::InvalidRequest { status, message } => (
                *status,
                ErrorBody {
                    error: "Invalid request".to_owned(),
                    details: message.clone(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "Not found".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::Persistence(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Could not save transactions".to_owned(),
                    details: format!(
                        "{error}. Your changes are kept in memory but have not been saved."
                    ),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::TrackerLockError | Error::JSONSerializationError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                },
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Validation(_) | Error::NotFound => {}
            Error::InvalidRequest { message, .. } => {
                tracing::debug!("Rejected request: {message}")
            }
            Error::Persistence(error) => tracing::warn!("Could not persist transactions: {error}"),
            error => tracing::error!("An unexpected error occurred: {error}"),
        }

        let (status_code, body) = self.status_and_body();

        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::error::{Error, PersistenceError, ValidationError};

    #[test]
    fn validation_error_is_unprocessable() {
        let response = Error::from(ValidationError::MissingField("amount")).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn persistence_error_is_internal_server_error() {
        let response = Error::from(PersistenceError::Unavailable("disk full".to_owned()))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_request_keeps_rejection_status() {
        let error = Error::InvalidRequest {
            status: StatusCode::BAD_REQUEST,
            message: "expected value".to_owned(),
        };

        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_is_not_found() {
        assert_eq!(Error::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }
}
