//! Defines the core data model for transactions and the rules that every
//! stored transaction must satisfy.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::{category::Category, error::ValidationError};

/// Identifier for a transaction, derived from its creation time in milliseconds.
pub type TransactionId = i64;

/// The minimum number of characters a description must have after trimming.
pub const MIN_DESCRIPTION_LENGTH: usize = 3;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// The value used in storage and in the API.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::UnknownTransactionType(other.to_owned())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never modified in place. Editing a transaction replaces
/// it wholesale with a new value that keeps the same `id` and `created_at`.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened, formatted as YYYY-MM-DD.
    ///
    /// This is kept as text so that stored records with a malformed date can
    /// still be loaded, listed and saved again. Use [Transaction::calendar_date]
    /// to get the parsed date.
    pub date: String,
    /// The category, drawn from the catalog for `transaction_type`.
    pub category: Category,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        transaction_type: TransactionType,
        amount: f64,
        date: Date,
        description: &str,
        category: Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            transaction_type,
            amount,
            date: date.to_string(),
            description: description.trim().to_owned(),
            category,
        }
    }

    /// The parsed date of the transaction, or `None` if the stored date is malformed.
    pub fn calendar_date(&self) -> Option<Date> {
        parse_date(&self.date)
    }

    /// Check the rules every stored transaction must satisfy.
    ///
    /// # Errors
    /// Returns a [ValidationError] if:
    /// - the amount is not a finite number greater than zero,
    /// - the trimmed description is shorter than [MIN_DESCRIPTION_LENGTH],
    /// - the date is not a valid YYYY-MM-DD date,
    /// - or the category does not belong to the catalog for the transaction type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;

        let description_length = self.description.trim().graphemes(true).count();
        if description_length < MIN_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooShort {
                min: MIN_DESCRIPTION_LENGTH,
                actual: description_length,
            });
        }

        if self.calendar_date().is_none() {
            return Err(ValidationError::InvalidDate(self.date.clone()));
        }

        if !self.category.belongs_to(self.transaction_type) {
            return Err(ValidationError::CategoryMismatch {
                category: self.category.to_string(),
                transaction_type: self.transaction_type,
            });
        }

        Ok(())
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID and creation time are assigned by the caller when the transaction
/// is added to a store, see [TransactionBuilder::finalize].
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether this is income or an expense.
    pub transaction_type: TransactionType,
    /// The amount of money, must be greater than zero.
    pub amount: f64,
    /// When the transaction happened, formatted as YYYY-MM-DD.
    pub date: String,
    /// The trimmed description.
    pub description: String,
    /// The category of the transaction.
    pub category: Category,
}

impl TransactionBuilder {
    /// Set the date of the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date.to_string();
        self
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.trim().to_owned();
        self
    }

    /// Create the [Transaction].
    ///
    /// No validation happens here; [crate::store::RecordStore::add] validates
    /// transactions before storing them.
    pub fn finalize(self, id: TransactionId, created_at: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            description: self.description,
            date: self.date,
            category: self.category,
            created_at,
        }
    }
}

/// Parse a YYYY-MM-DD date.
///
/// Full RFC 3339 date-times are also accepted, in which case only the date
/// part is used.
pub fn parse_date(text: &str) -> Option<Date> {
    let text = text.trim();

    Date::parse(text, DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .ok()
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveAmount(amount))
    }
}
