//! The raw input for creating or editing a transaction.

use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    error::ValidationError,
    transaction::{
        Transaction, TransactionBuilder, TransactionType, core::validate_amount, parse_date,
    },
};

/// The amount as sent by a client, either a JSON number or text from an input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    /// A JSON number.
    Number(f64),
    /// Text that should contain a decimal number, e.g. "12.50".
    Text(String),
}

impl AmountField {
    fn parse(&self) -> Result<f64, ValidationError> {
        match self {
            AmountField::Number(amount) => Ok(*amount),
            AmountField::Text(text) => {
                let text = text.trim();

                if text.is_empty() {
                    return Err(ValidationError::MissingField("amount"));
                }

                text.parse::<f64>()
                    .map_err(|_| ValidationError::InvalidAmount(text.to_owned()))
            }
        }
    }
}

/// The form data for creating or editing a transaction.
///
/// Every field is optional so that missing fields are reported as a
/// [ValidationError] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Either "income" or "expense".
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    /// The value of the transaction, must be greater than zero.
    #[serde(default)]
    pub amount: Option<AmountField>,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The date when the transaction ocurred, formatted as YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<String>,
    /// The category of the transaction, e.g. "food".
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionForm {
    /// Parse the form into a [TransactionBuilder].
    ///
    /// Required fields are checked first, then each field's format. The
    /// resulting builder has a positive amount, a valid date and a known
    /// category; the remaining rules are checked by [crate::transaction::Transaction::validate].
    ///
    /// # Errors
    /// Returns the first [ValidationError] found.
    pub fn parse(&self) -> Result<TransactionBuilder, ValidationError> {
        let transaction_type = required(&self.transaction_type, "type")?;
        let amount = self
            .amount
            .as_ref()
            .ok_or(ValidationError::MissingField("amount"))?;
        let description = required(&self.description, "description")?;
        let date = required(&self.date, "date")?;
        let category = required(&self.category, "category")?;

        let transaction_type: TransactionType = transaction_type.parse()?;
        let amount = amount.parse()?;
        validate_amount(amount)?;
        let date = parse_date(date).ok_or_else(|| ValidationError::InvalidDate(date.to_owned()))?;
        let category: Category = category.parse()?;

        Ok(Transaction::build(
            transaction_type,
            amount,
            date,
            description,
            category,
        ))
    }
}

fn required<'a>(
    field: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(name)),
    }
}
