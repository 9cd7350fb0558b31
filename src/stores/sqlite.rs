//! A SQLite implementation of the snapshot store.
//!
//! State lives in a single key-value table with the accounts and budgets
//! serialized as JSON arrays under their own keys, the same shape the
//! browser build of the tracker kept in local storage.

use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::{
    Error, FinanceStore,
    stores::{ACCOUNTS_KEY, BUDGETS_KEY, SnapshotStore},
};

/// Persists [FinanceStore] snapshots to a SQLite key-value table.
pub struct SqliteSnapshotStore {
    connection: Connection,
}

impl SqliteSnapshotStore {
    /// Create a snapshot store backed by `connection`, creating the
    /// key-value table if it does not exist yet.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_snapshot_table(&connection)?;

        Ok(SqliteSnapshotStore { connection })
    }

    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let mut statement = self
            .connection
            .prepare("SELECT value FROM snapshot WHERE key = :key")?;
        let mut rows = statement.query(&[(":key", key)])?;

        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO snapshot (key, value) VALUES (:key, :value)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            &[(":key", key), (":value", value)],
        )?;

        Ok(())
    }

    /// Read one key, falling back to `fallback` when the key is missing or
    /// its value cannot be parsed.
    ///
    /// A missing key is normal on first run and logged at debug. An
    /// unparseable value means the saved records are silently replaced by
    /// the defaults, so it is logged as a warning.
    fn load_key<T: DeserializeOwned>(&self, key: &str, fallback: Vec<T>) -> Vec<T> {
        let value = match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!("no saved data under key {key}, using defaults");
                return fallback;
            }
            Err(error) => {
                tracing::warn!("could not read saved data under key {key}, using defaults: {error}");
                return fallback;
            }
        };

        match serde_json::from_str(&value) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!("discarding corrupt saved data under key {key}: {error}");
                fallback
            }
        }
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> FinanceStore {
        let starter = FinanceStore::starter();

        FinanceStore {
            accounts: self.load_key(ACCOUNTS_KEY, starter.accounts),
            budgets: self.load_key(BUDGETS_KEY, starter.budgets),
        }
    }

    fn save(&mut self, snapshot: &FinanceStore) -> Result<(), Error> {
        let accounts = serde_json::to_string(&snapshot.accounts)?;
        let budgets = serde_json::to_string(&snapshot.budgets)?;

        self.set(ACCOUNTS_KEY, &accounts)?;
        self.set(BUDGETS_KEY, &budgets)
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.connection.execute("DELETE FROM snapshot", ())?;

        Ok(())
    }
}

/// Create the key-value snapshot table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created.
pub fn create_snapshot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS snapshot (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}
