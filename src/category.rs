//! The fixed category catalog.
//!
//! Every transaction has exactly one category, and that category must come
//! from the catalog that matches the transaction's type: income categories for
//! income and expense categories for expenses.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, transaction::TransactionType};

/// A category for expenses and income, e.g., 'food', 'salary'.
///
/// The variants are declared in catalog order, so sorting by [Category] sorts
/// income categories first and then expense categories as listed in the
/// catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Wages from an employer.
    Salary,
    /// Payment for contract work.
    Freelance,
    /// Interest, dividends and other returns.
    Investment,
    /// Income that fits no other category.
    OtherIncome,
    /// Groceries and eating out.
    Food,
    /// Public transport, fuel and fares.
    Transport,
    /// Clothes and other purchases.
    Shopping,
    /// Movies, games and outings.
    Entertainment,
    /// Rent, power, phone and other bills.
    Bills,
    /// Doctor visits and medicine.
    Health,
    /// Courses, books and fees.
    Education,
    /// Expenses that fit no other category.
    Other,
}

/// The categories that may be used for income transactions.
pub const INCOME_CATEGORIES: [Category; 4] = [
    Category::Salary,
    Category::Freelance,
    Category::Investment,
    Category::OtherIncome,
];

/// The categories that may be used for expense transactions.
pub const EXPENSE_CATEGORIES: [Category; 8] = [
    Category::Food,
    Category::Transport,
    Category::Shopping,
    Category::Entertainment,
    Category::Bills,
    Category::Health,
    Category::Education,
    Category::Other,
];

impl Category {
    /// The catalog entries for `transaction_type`.
    pub fn catalog(transaction_type: TransactionType) -> &'static [Category] {
        match transaction_type {
            TransactionType::Income => &INCOME_CATEGORIES,
            TransactionType::Expense => &EXPENSE_CATEGORIES,
        }
    }

    /// Whether this category is listed in the catalog for `transaction_type`.
    pub fn belongs_to(self, transaction_type: TransactionType) -> bool {
        Self::catalog(transaction_type).contains(&self)
    }

    /// The value used in storage and in the API, e.g. "other-income".
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investment => "investment",
            Category::OtherIncome => "other-income",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Bills => "bills",
            Category::Health => "health",
            Category::Education => "education",
            Category::Other => "other",
        }
    }

    /// A human readable name, e.g. "other-income" becomes "Other Income".
    pub fn label(self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        INCOME_CATEGORIES
            .iter()
            .chain(EXPENSE_CATEGORIES.iter())
            .find(|category| category.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::{
        category::{Category, EXPENSE_CATEGORIES, INCOME_CATEGORIES},
        error::ValidationError,
        transaction::TransactionType,
    };

    #[test]
    fn catalogs_do_not_overlap() {
        for category in INCOME_CATEGORIES {
            assert!(category.belongs_to(TransactionType::Income));
            assert!(!category.belongs_to(TransactionType::Expense));
        }

        for category in EXPENSE_CATEGORIES {
            assert!(category.belongs_to(TransactionType::Expense));
            assert!(!category.belongs_to(TransactionType::Income));
        }
    }

    #[test]
    fn parses_every_catalog_entry() {
        for category in INCOME_CATEGORIES.iter().chain(EXPENSE_CATEGORIES.iter()) {
            assert_eq!(Category::from_str(category.as_str()), Ok(*category));
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert_eq!(
            Category::from_str("groceries"),
            Err(ValidationError::UnknownCategory("groceries".to_owned()))
        );
    }

    #[test]
    fn label_capitalises_each_word() {
        assert_eq!(Category::OtherIncome.label(), "Other Income");
        assert_eq!(Category::Food.label(), "Food");
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&Category::OtherIncome).unwrap();

        assert_eq!(json, "\"other-income\"");
    }
}
