//! Loading and saving the transaction collection.
//!
//! Storage is an opaque key-value blob store. The whole collection is stored
//! as one JSON array under [TRANSACTIONS_KEY] and rewritten in full after
//! every change.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use crate::{error::PersistenceError, transaction::Transaction};

/// The key the transaction collection is stored under.
pub const TRANSACTIONS_KEY: &str = "expenseTrackerTransactions";

/// A store of text blobs addressed by key.
pub trait KeyValueStore: Send {
    /// Get the value stored under `key`, or `None` if nothing has been stored yet.
    ///
    /// # Errors
    /// Returns a [PersistenceError::Unavailable] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a [PersistenceError::Unavailable] if the store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// A [KeyValueStore] that keeps each key in its own JSON file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    /// Open a store in `directory`, creating the directory if it does not exist.
    ///
    /// # Errors
    /// Returns a [PersistenceError::Unavailable] if the directory cannot be created.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|error| unavailable(&directory, error))?;

        Ok(Self { directory })
    }

    /// The path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(unavailable(&path, error)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        // The rename replaces the previous value atomically.
        fs::write(&temp_path, value).map_err(|error| unavailable(&temp_path, error))?;
        fs::rename(&temp_path, &path).map_err(|error| unavailable(&path, error))
    }
}

/// A [KeyValueStore] that only lives in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Loads and saves the full transaction collection through a [KeyValueStore].
pub struct TransactionGateway {
    store: Box<dyn KeyValueStore>,
}

impl TransactionGateway {
    /// Create a gateway that reads and writes `store`.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Load the stored transactions in their stored order.
    ///
    /// Returns an empty list if nothing has been stored yet.
    ///
    /// # Errors
    /// Returns a [PersistenceError::Unavailable] if the store cannot be read,
    /// or a [PersistenceError::Corrupt] if the stored value is not a JSON
    /// array of transactions.
    pub fn load(&self) -> Result<Vec<Transaction>, PersistenceError> {
        let Some(contents) = self.store.get(TRANSACTIONS_KEY)? else {
            tracing::info!("No stored transactions found, starting with an empty list");
            return Ok(Vec::new());
        };

        let transactions: Vec<Transaction> = serde_json::from_str(&contents)
            .map_err(|error| PersistenceError::Corrupt(error.to_string()))?;
        tracing::info!("Loaded {} transactions", transactions.len());

        Ok(transactions)
    }

    /// Replace the stored transactions with `transactions`.
    ///
    /// # Errors
    /// Returns a [PersistenceError] if the transactions cannot be serialized
    /// or the store cannot be written.
    pub fn save(&mut self, transactions: &[Transaction]) -> Result<(), PersistenceError> {
        let contents = serde_json::to_string(transactions)
            .map_err(|error| PersistenceError::Serialization(error.to_string()))?;

        self.store.set(TRANSACTIONS_KEY, &contents)?;
        tracing::debug!("Saved {} transactions", transactions.len());

        Ok(())
    }
}

impl std::fmt::Debug for TransactionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionGateway").finish_non_exhaustive()
    }
}

fn unavailable(path: &Path, error: io::Error) -> PersistenceError {
    PersistenceError::Unavailable(format!("{}: {error}", path.display()))
}
