//! Filters for narrowing down the transaction list by category, type and date.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

/// Which categories to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    /// Do not filter by category.
    #[default]
    All,
    /// Only show transactions with this category.
    #[serde(untagged)]
    Only(Category),
}

/// Which transaction types to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeFilter {
    /// Do not filter by type.
    #[default]
    All,
    /// Only show transactions of this type.
    #[serde(untagged)]
    Only(TransactionType),
}

/// A date range relative to the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRangePreset {
    /// Do not filter by date.
    #[default]
    All,
    /// The current day.
    Today,
    /// The current week, starting on Monday.
    Week,
    /// The current calendar month.
    Month,
    /// The current calendar year.
    Year,
}

/// The category/type/date-range predicate applied to the transaction list.
///
/// The default specification matches every transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Which categories to show.
    pub category: CategoryFilter,
    /// Which transaction types to show.
    #[serde(rename = "type")]
    pub transaction_type: TypeFilter,
    /// Which dates to show, relative to today.
    pub date_range: DateRangePreset,
}

/// A half-open interval of dates: `start` is included, `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    /// The first day in the interval.
    pub start: Date,
    /// The first day after the interval.
    pub end: Date,
}

impl DateInterval {
    /// Whether `date` falls within the interval.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}

impl DateRangePreset {
    /// The interval this preset covers when the current day is `today`.
    ///
    /// Returns `None` for [DateRangePreset::All], and for presets whose bounds
    /// fall outside the representable range of dates.
    pub fn interval(self, today: Date) -> Option<DateInterval> {
        match self {
            DateRangePreset::All => None,
            DateRangePreset::Today => day_bounds(today),
            DateRangePreset::Week => week_bounds(today),
            DateRangePreset::Month => month_bounds(today),
            DateRangePreset::Year => year_bounds(today.year()),
        }
    }
}

impl FilterSpec {
    /// Whether `transaction` satisfies the category and type parts of the filter.
    fn matches_fields(&self, transaction: &Transaction) -> bool {
        let category_matches = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => transaction.category == category,
        };

        let type_matches = match self.transaction_type {
            TypeFilter::All => true,
            TypeFilter::Only(transaction_type) => transaction.transaction_type == transaction_type,
        };

        category_matches && type_matches
    }
}

/// Get the transactions that match `filter`, keeping their original order.
///
/// Date ranges are anchored on `today`. Transactions with a malformed date
/// never match a date range, but are kept when the date range is
/// [DateRangePreset::All].
pub fn apply<'a>(
    transactions: &'a [Transaction],
    filter: &FilterSpec,
    today: Date,
) -> Vec<&'a Transaction> {
    let interval = filter.date_range.interval(today);

    transactions
        .iter()
        .filter(|transaction| filter.matches_fields(transaction))
        .filter(|transaction| match interval {
            Some(interval) => transaction
                .calendar_date()
                .is_some_and(|date| interval.contains(date)),
            None => true,
        })
        .collect()
}

fn day_bounds(today: Date) -> Option<DateInterval> {
    Some(DateInterval {
        start: today,
        end: today.next_day()?,
    })
}

fn week_bounds(today: Date) -> Option<DateInterval> {
    let days_since_monday = today.weekday().number_days_from_monday() as i64;
    let start = today.checked_sub(Duration::days(days_since_monday))?;
    let end = start.checked_add(Duration::days(7))?;

    Some(DateInterval { start, end })
}

fn month_bounds(today: Date) -> Option<DateInterval> {
    let start = today.replace_day(1).ok()?;
    let end = match today.month() {
        Month::December => Date::from_calendar_date(today.year() + 1, Month::January, 1),
        month => Date::from_calendar_date(today.year(), month.next(), 1),
    }
    .ok()?;

    Some(DateInterval { start, end })
}

fn year_bounds(year: i32) -> Option<DateInterval> {
    Some(DateInterval {
        start: Date::from_calendar_date(year, Month::January, 1).ok()?,
        end: Date::from_calendar_date(year + 1, Month::January, 1).ok()?,
    })
}
