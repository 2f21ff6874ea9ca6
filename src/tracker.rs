//! The expense tracker: the transaction store together with the filter and
//! page the user is looking at.
//!
//! Every mutation is applied in memory first and then the whole collection is
//! saved through the [TransactionGateway]. If saving fails the change is kept
//! in memory and an [Error::Persistence] is returned so the caller can warn
//! the user.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    category::Category,
    dashboard::{
        ChartOptions, FooterStats, MonthlyTotals, Summary, expense_by_category, filtered_total,
        footer_stats, monthly_totals, summary,
    },
    export::ExportDocument,
    filter::{self, FilterSpec},
    pagination::{
        Pagination, PaginationConfig, PaginationIndicator, create_pagination_indicators,
        page_count, paginate,
    },
    persistence::TransactionGateway,
    store::RecordStore,
    transaction::{Transaction, TransactionForm, TransactionId},
};

/// Settings for how the transaction list is paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// The number of transactions on each page.
    pub items_per_page: usize,
    /// The maximum number of numbered pages in the page indicators.
    pub max_page_indicators: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let pagination = PaginationConfig::default();

        Self {
            items_per_page: pagination.page_size,
            max_page_indicators: pagination.max_pages,
        }
    }
}

/// Everything a client needs to draw the transaction list and the dashboard.
///
/// The summary, the paged records and the filtered total are computed over
/// the filtered transactions. The category and monthly totals and the footer
/// statistics cover every transaction.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// The filtered transactions on the current page.
    pub paged_records: Vec<Transaction>,
    /// The number of pages of filtered transactions, at least 1.
    pub total_pages: usize,
    /// The current page, counting from 1. May exceed `total_pages` after deletes.
    pub current_page: usize,
    /// The page links to show under the list.
    pub page_indicators: Vec<PaginationIndicator>,
    /// The active filter.
    pub filter: FilterSpec,
    /// The number of transactions that match the filter.
    pub filtered_count: usize,
    /// Income minus expenses over the filtered transactions.
    pub filtered_total: f64,
    /// Income and expense totals over the filtered transactions.
    pub summary: Summary,
    /// Expenses by category over every transaction.
    pub expense_by_category: BTreeMap<Category, f64>,
    /// Income and expenses by month over every transaction.
    pub monthly_totals: MonthlyTotals,
    /// Counts over every transaction.
    pub footer_stats: FooterStats,
}

/// Owns the transactions and the list state, and keeps storage in sync.
#[derive(Debug)]
pub struct ExpenseTracker {
    store: RecordStore,
    gateway: TransactionGateway,
    filter: FilterSpec,
    pagination: Pagination,
    max_page_indicators: usize,
}

impl ExpenseTracker {
    /// Create a tracker holding the transactions stored in `gateway`.
    ///
    /// # Errors
    /// Returns an [Error::Persistence] if the stored transactions cannot be
    /// read or are corrupt. Nothing is written in that case, so corrupt data
    /// is left for the user to recover.
    pub fn load(gateway: TransactionGateway, config: TrackerConfig) -> Result<Self, Error> {
        let transactions = gateway.load().inspect_err(|error| {
            tracing::error!("Could not load stored transactions: {error}");
        })?;

        Ok(Self {
            store: RecordStore::from_transactions(transactions),
            gateway,
            filter: FilterSpec::default(),
            pagination: Pagination::new(config.items_per_page),
            max_page_indicators: config.max_page_indicators.max(1),
        })
    }

    /// Validate `form`, add the transaction to the front of the list and save.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if the form is invalid, in which case
    /// nothing changes, or an [Error::Persistence] if the transaction was added
    /// but could not be saved.
    pub fn add_transaction(&mut self, form: &TransactionForm) -> Result<Transaction, Error> {
        let builder = form.parse()?;
        let now = OffsetDateTime::now_utc();
        let id = self.store.next_id(now);

        let transaction = self.store.add(builder.finalize(id, now))?.clone();
        tracing::info!(
            "Added {} transaction {} for {}",
            transaction.transaction_type,
            transaction.id,
            transaction.amount
        );

        self.persist()?;

        Ok(transaction)
    }

    /// Replace the details of the transaction `id` with `form` and save.
    ///
    /// The transaction keeps its ID, creation time and position in the list.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if the form is invalid, [Error::NotFound]
    /// if there is no transaction `id`, or an [Error::Persistence] if the
    /// change could not be saved.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        form: &TransactionForm,
    ) -> Result<Transaction, Error> {
        let builder = form.parse()?;

        let transaction = self
            .store
            .update(id, builder.finalize(id, OffsetDateTime::now_utc()))?
            .clone();
        tracing::info!("Updated transaction {id}");

        self.persist()?;

        Ok(transaction)
    }

    /// Delete the transaction `id` and save.
    ///
    /// Returns the deleted transaction, or `None` if there was no such
    /// transaction. Deleting a missing transaction does not touch storage.
    ///
    /// # Errors
    /// Returns an [Error::Persistence] if the deletion could not be saved.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let Some(removed) = self.store.remove(id) else {
            tracing::debug!("Transaction {id} not found, nothing to delete");
            return Ok(None);
        };

        tracing::info!("Deleted transaction {id}");
        self.persist()?;

        Ok(Some(removed))
    }

    /// Delete every transaction and save.
    ///
    /// # Errors
    /// Returns an [Error::Persistence] if the deletion could not be saved.
    pub fn delete_all(&mut self) -> Result<(), Error> {
        let count = self.store.len();
        self.store.clear();
        tracing::info!("Deleted all {count} transactions");

        self.persist()
    }

    /// Show only transactions matching `filter`, starting from the first page.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        tracing::debug!("Setting filter to {filter:?}");
        self.filter = filter;
        self.pagination.reset();
    }

    /// Show every transaction, starting from the first page.
    pub fn clear_filter(&mut self) {
        self.set_filter(FilterSpec::default());
    }

    /// Jump to `page`. Pages below 1 go to the first page.
    pub fn set_page(&mut self, page: usize) {
        self.pagination.set(page);
    }

    /// Go to the next page of filtered transactions, unless on the last page.
    ///
    /// `today` anchors the date range of the filter.
    pub fn next_page(&mut self, today: Date) {
        let filtered_count = filter::apply(self.store.transactions(), &self.filter, today).len();
        let total_pages = page_count(filtered_count, self.pagination.items_per_page);

        self.pagination.next(total_pages);
    }

    /// Go to the previous page, unless on the first page.
    pub fn prev_page(&mut self) {
        self.pagination.prev();
    }

    /// The active filter.
    pub fn filter(&self) -> FilterSpec {
        self.filter
    }

    /// The current page and page size.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Every transaction, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    /// Compute the list and dashboard for the current filter and page.
    ///
    /// `today` anchors the date range of the filter.
    pub fn view(&self, today: Date) -> View {
        let all: Vec<&Transaction> = self.store.transactions().iter().collect();
        let filtered = filter::apply(self.store.transactions(), &self.filter, today);
        let current_page = self.pagination.current_page;
        let page = paginate(&filtered, current_page, self.pagination.items_per_page);

        tracing::debug!(
            "Computed view with {} of {} transactions on page {current_page} of {}",
            filtered.len(),
            all.len(),
            page.total_pages
        );

        View {
            paged_records: page.items.iter().map(|&transaction| transaction.clone()).collect(),
            total_pages: page.total_pages,
            current_page,
            page_indicators: create_pagination_indicators(
                current_page,
                page.total_pages,
                self.max_page_indicators,
            ),
            filter: self.filter,
            filtered_count: filtered.len(),
            filtered_total: filtered_total(&filtered),
            summary: summary(&filtered),
            expense_by_category: expense_by_category(&all),
            monthly_totals: monthly_totals(&all),
            footer_stats: footer_stats(&all),
        }
    }

    /// The chart options for every transaction.
    ///
    /// # Errors
    /// Returns an [Error::JSONSerializationError] if a chart cannot be converted to JSON.
    pub fn charts(&self) -> Result<ChartOptions, Error> {
        let all: Vec<&Transaction> = self.store.transactions().iter().collect();

        ChartOptions::new(&expense_by_category(&all), &monthly_totals(&all))
    }

    /// Snapshot every transaction for export at `now`.
    pub fn export(&self, now: OffsetDateTime) -> ExportDocument {
        ExportDocument::new(self.store.transactions().to_vec(), now)
    }

    fn persist(&mut self) -> Result<(), Error> {
        self.gateway
            .save(self.store.transactions())
            .map_err(|error| {
                tracing::warn!("Could not save transactions, changes are only kept in memory: {error}");
                Error::from(error)
            })
    }
}

/// Lock the shared tracker.
///
/// # Errors
/// Returns an [Error::TrackerLockError] if the lock is poisoned.
pub(crate) fn lock_tracker(
    tracker: &Mutex<ExpenseTracker>,
) -> Result<MutexGuard<'_, ExpenseTracker>, Error> {
    tracker.lock().map_err(|error| {
        tracing::error!("Could not acquire tracker lock: {error}");
        Error::TrackerLockError
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use time::macros::date;

    use crate::{
        Error,
        category::Category,
        dashboard::{FooterStats, MonthlyTotal, Summary},
        error::{PersistenceError, ValidationError},
        filter::{CategoryFilter, DateRangePreset, FilterSpec, TypeFilter},
        pagination::PaginationIndicator,
        persistence::{KeyValueStore, MemoryStore, TRANSACTIONS_KEY, TransactionGateway},
        tracker::{ExpenseTracker, TrackerConfig},
        transaction::{AmountField, TransactionForm, TransactionType},
    };

    /// A store that shares its contents with the test so saves can be inspected.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.0.lock().unwrap().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
            self.0.lock().unwrap().set(key, value)
        }
    }

    /// A store that can be read but never written.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("quota exceeded".to_owned()))
        }
    }

    fn form(
        transaction_type: &str,
        amount: f64,
        description: &str,
        date: &str,
        category: &str,
    ) -> TransactionForm {
        TransactionForm {
            transaction_type: Some(transaction_type.to_owned()),
            amount: Some(AmountField::Number(amount)),
            description: Some(description.to_owned()),
            date: Some(date.to_owned()),
            category: Some(category.to_owned()),
        }
    }

    fn empty_tracker() -> ExpenseTracker {
        ExpenseTracker::load(
            TransactionGateway::new(MemoryStore::new()),
            TrackerConfig::default(),
        )
        .unwrap()
    }

    fn january_tracker() -> ExpenseTracker {
        let mut tracker = empty_tracker();
        tracker
            .add_transaction(&form("income", 1000.0, "Salary", "2024-01-15", "salary"))
            .unwrap();
        tracker
            .add_transaction(&form("expense", 200.0, "Groceries", "2024-01-20", "food"))
            .unwrap();
        tracker
    }

    #[test]
    fn january_scenario_view() {
        let tracker = january_tracker();

        let view = tracker.view(date!(2024 - 01 - 31));

        assert_eq!(
            view.summary,
            Summary {
                total_income: 1000.0,
                total_expense: 200.0,
                net: 800.0,
            }
        );
        assert_eq!(view.expense_by_category.len(), 1);
        assert_eq!(view.expense_by_category[&Category::Food], 200.0);
        assert_eq!(
            view.monthly_totals[0],
            MonthlyTotal {
                income: 1000.0,
                expense: 200.0,
            }
        );
        assert_eq!(view.filtered_total, 800.0);
        assert_eq!(
            view.footer_stats,
            FooterStats {
                total_transactions: 2,
                days_tracked: 2,
            }
        );
    }

    #[test]
    fn newest_transaction_is_listed_first_with_increasing_ids() {
        let tracker = january_tracker();

        let view = tracker.view(date!(2024 - 01 - 31));

        assert_eq!(view.paged_records[0].description, "Groceries");
        assert_eq!(view.paged_records[1].description, "Salary");
        assert!(view.paged_records[0].id > view.paged_records[1].id);
    }

    #[test]
    fn invalid_form_changes_nothing() {
        let mut tracker = january_tracker();

        let result = tracker.add_transaction(&form("expense", 10.0, "ab", "2024-01-20", "food"));

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::DescriptionTooShort {
                min: 3,
                actual: 2,
            }))
        );
        assert_eq!(tracker.transactions().len(), 2);
    }

    #[test]
    fn mutations_are_saved() {
        let store = SharedStore::default();
        let mut tracker =
            ExpenseTracker::load(TransactionGateway::new(store.clone()), TrackerConfig::default())
                .unwrap();

        let added = tracker
            .add_transaction(&form("expense", 5.0, "Coffee", "2024-01-20", "food"))
            .unwrap();

        let reloaded =
            ExpenseTracker::load(TransactionGateway::new(store.clone()), TrackerConfig::default())
                .unwrap();
        assert_eq!(reloaded.transactions(), &[added.clone()]);

        tracker.delete_transaction(added.id).unwrap();
        let saved = store.get(TRANSACTIONS_KEY).unwrap();
        assert_eq!(saved.as_deref(), Some("[]"));
    }

    #[test]
    fn failed_save_keeps_change_in_memory() {
        let mut tracker =
            ExpenseTracker::load(TransactionGateway::new(ReadOnlyStore), TrackerConfig::default())
                .unwrap();

        let result = tracker.add_transaction(&form("expense", 5.0, "Coffee", "2024-01-20", "food"));

        assert_eq!(
            result,
            Err(Error::Persistence(PersistenceError::Unavailable(
                "quota exceeded".to_owned()
            )))
        );
        assert_eq!(tracker.transactions().len(), 1);
    }

    #[test]
    fn corrupt_storage_fails_to_load() {
        let mut store = MemoryStore::new();
        store.set(TRANSACTIONS_KEY, "not json").unwrap();

        let result = ExpenseTracker::load(TransactionGateway::new(store), TrackerConfig::default());

        assert!(matches!(
            result,
            Err(Error::Persistence(PersistenceError::Corrupt(_)))
        ));
    }

    #[test]
    fn update_keeps_id_created_at_and_position() {
        let mut tracker = january_tracker();
        let original = tracker.transactions()[1].clone();

        let updated = tracker
            .update_transaction(
                original.id,
                &form("income", 1200.0, "Salary and bonus", "2024-01-16", "salary"),
            )
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.amount, 1200.0);
        assert_eq!(tracker.transactions()[1], updated);
    }

    #[test]
    fn update_missing_transaction_is_not_found() {
        let mut tracker = january_tracker();

        let result = tracker.update_transaction(
            42,
            &form("expense", 10.0, "Groceries", "2024-01-20", "food"),
        );

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn deleting_missing_transaction_is_a_no_op() {
        let mut tracker = january_tracker();

        assert_eq!(tracker.delete_transaction(42), Ok(None));
        assert_eq!(tracker.transactions().len(), 2);
    }

    #[test]
    fn delete_all_empties_the_view() {
        let mut tracker = january_tracker();

        tracker.delete_all().unwrap();
        let view = tracker.view(date!(2024 - 01 - 31));

        assert!(view.paged_records.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.summary, Summary::default());
        assert_eq!(view.footer_stats, FooterStats::default());
    }

    #[test]
    fn summary_follows_filter_but_dashboard_totals_do_not() {
        let mut tracker = january_tracker();

        tracker.set_filter(FilterSpec {
            transaction_type: TypeFilter::Only(TransactionType::Expense),
            ..Default::default()
        });
        let view = tracker.view(date!(2024 - 01 - 31));

        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.summary.total_income, 0.0);
        assert_eq!(view.summary.total_expense, 200.0);
        assert_eq!(view.monthly_totals[0].income, 1000.0);
        assert_eq!(view.footer_stats.total_transactions, 2);
    }

    #[test]
    fn changing_filter_resets_page() {
        let mut tracker = empty_tracker();
        for day in 1..=25 {
            tracker
                .add_transaction(&form(
                    "expense",
                    1.0,
                    "Bus fare",
                    &format!("2024-03-{day:02}"),
                    "transport",
                ))
                .unwrap();
        }
        let today = date!(2024 - 03 - 25);

        tracker.next_page(today);
        tracker.next_page(today);
        assert_eq!(tracker.pagination().current_page, 3);

        tracker.set_filter(FilterSpec {
            category: CategoryFilter::Only(Category::Transport),
            ..Default::default()
        });
        assert_eq!(tracker.pagination().current_page, 1);

        tracker.set_page(3);
        tracker.clear_filter();
        assert_eq!(tracker.pagination().current_page, 1);
        assert_eq!(tracker.filter(), FilterSpec::default());
    }

    #[test]
    fn next_page_stops_at_last_filtered_page() {
        let mut tracker = empty_tracker();
        for day in 1..=12 {
            tracker
                .add_transaction(&form(
                    "expense",
                    1.0,
                    "Bus fare",
                    &format!("2024-03-{day:02}"),
                    "transport",
                ))
                .unwrap();
        }
        let today = date!(2024 - 03 - 12);

        tracker.next_page(today);
        tracker.next_page(today);
        let view = tracker.view(today);

        assert_eq!(view.current_page, 2);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.paged_records.len(), 2);
        assert_eq!(
            view.page_indicators,
            vec![
                PaginationIndicator::BackButton(1),
                PaginationIndicator::Page(1),
                PaginationIndicator::CurrPage(2),
            ]
        );

        tracker.set_filter(FilterSpec {
            date_range: DateRangePreset::Today,
            ..Default::default()
        });
        tracker.next_page(today);
        assert_eq!(tracker.pagination().current_page, 1);
    }

    #[test]
    fn current_page_is_not_clamped_after_deletes() {
        let mut tracker = empty_tracker();
        for day in 1..=11 {
            tracker
                .add_transaction(&form(
                    "expense",
                    1.0,
                    "Bus fare",
                    &format!("2024-03-{day:02}"),
                    "transport",
                ))
                .unwrap();
        }
        let today = date!(2024 - 03 - 12);
        tracker.next_page(today);
        let oldest = tracker.transactions()[10].id;

        tracker.delete_transaction(oldest).unwrap();
        let view = tracker.view(today);

        assert_eq!(view.current_page, 2);
        assert_eq!(view.total_pages, 1);
        assert!(view.paged_records.is_empty());
    }

    #[test]
    fn charts_cover_every_transaction() {
        let mut tracker = january_tracker();
        tracker.set_filter(FilterSpec {
            transaction_type: TypeFilter::Only(TransactionType::Income),
            ..Default::default()
        });

        let charts = tracker.charts().unwrap();

        assert!(charts.expense_chart.to_string().contains("Food"));
    }

    #[test]
    fn export_contains_every_transaction() {
        let tracker = january_tracker();

        let document = tracker.export(time::macros::datetime!(2024-02-01 00:00 UTC));

        assert_eq!(document.transactions, tracker.transactions());
        assert_eq!(document.file_name(), "expense-tracker-2024-02-01.json");
    }
}
