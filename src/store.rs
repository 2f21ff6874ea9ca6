//! The in-memory collection of transactions.
//!
//! The store keeps transactions newest first and enforces the transaction
//! rules on every insert. It never talks to storage itself: the caller saves
//! the collection after each mutation, see [crate::tracker::ExpenseTracker].

use time::OffsetDateTime;

use crate::{
    Error,
    error::ValidationError,
    transaction::{Transaction, TransactionId},
};

/// An ordered collection of transactions, newest first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordStore {
    transactions: Vec<Transaction>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `transactions` in the given order.
    ///
    /// The transactions are not validated, they are assumed to come from
    /// storage where they were validated when first added.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Validate `transaction` and insert it at the front of the collection.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the transaction breaks any of the
    /// rules in [Transaction::validate]. The store is unchanged on error.
    pub fn add(&mut self, transaction: Transaction) -> Result<&Transaction, ValidationError> {
        transaction.validate()?;
        self.transactions.insert(0, transaction);

        Ok(&self.transactions[0])
    }

    /// Replace the transaction with `id` by `transaction`, keeping its position.
    ///
    /// The replacement keeps the original's `id` and `created_at`.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if `transaction` is invalid, or
    /// [Error::NotFound] if there is no transaction with `id`.
    pub fn update(
        &mut self,
        id: TransactionId,
        transaction: Transaction,
    ) -> Result<&Transaction, Error> {
        transaction.validate()?;

        let existing = self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or(Error::NotFound)?;

        *existing = Transaction {
            id: existing.id,
            created_at: existing.created_at,
            ..transaction
        };

        Ok(existing)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns the removed transaction, or `None` if there was no transaction
    /// with `id`, in which case the store is unchanged.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)?;

        Some(self.transactions.remove(index))
    }

    /// Remove every transaction.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Replace the whole collection with `transactions`.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Get the transaction with `id`.
    pub fn find_by_id(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// The transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the store.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// An ID for a transaction created at `now`.
    ///
    /// IDs are the creation time in milliseconds since the Unix epoch. If that
    /// would collide with or precede an existing ID, the largest existing ID
    /// plus one is used instead. If the largest existing ID is already
    /// [TransactionId::MAX], the lowest unused positive ID is used.
    pub fn next_id(&self, now: OffsetDateTime) -> TransactionId {
        let timestamp = TransactionId::try_from(now.unix_timestamp_nanos() / 1_000_000)
            .unwrap_or(TransactionId::MAX);

        match self.transactions.iter().map(|transaction| transaction.id).max() {
            Some(max_id) if max_id >= timestamp => max_id
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_unused_id()),
            _ => timestamp,
        }
    }

    fn lowest_unused_id(&self) -> TransactionId {
        let mut ids: Vec<TransactionId> = self
            .transactions
            .iter()
            .map(|transaction| transaction.id)
            .filter(|&id| id > 0)
            .collect();
        ids.sort_unstable();
        ids.dedup();

        // There are fewer transactions than positive IDs, so there is always a gap.
        let mut candidate = 1;
        for id in ids {
            if id != candidate {
                break;
            }
            candidate += 1;
        }

        candidate
    }
}
