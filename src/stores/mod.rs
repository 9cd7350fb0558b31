//! Contains the trait and implementations for persisting [FinanceStore]
//! snapshots to local key-value storage.

pub mod sqlite;

use crate::{Error, FinanceStore};

/// The storage key holding the serialized account list.
pub(crate) const ACCOUNTS_KEY: &str = "accounts";

/// The storage key holding the serialized budget list.
pub(crate) const BUDGETS_KEY: &str = "budgets";

/// Handles loading and saving [FinanceStore] snapshots.
///
/// Implementations are fire-and-forget collaborators: the tracker saves after
/// every committed mutation and carries on in memory when a save fails.
pub trait SnapshotStore {
    /// Load the saved snapshot.
    ///
    /// Never fails: state that is missing or cannot be parsed falls back to
    /// the matching part of [FinanceStore::starter].
    fn load(&self) -> FinanceStore;

    /// Persist a snapshot.
    ///
    /// # Errors
    /// Returns [Error] if the snapshot could not be serialized or written.
    fn save(&mut self, snapshot: &FinanceStore) -> Result<(), Error>;

    /// Remove all saved state, so the next load starts from the defaults.
    ///
    /// # Errors
    /// Returns [Error] if the saved state could not be removed.
    fn clear(&mut self) -> Result<(), Error>;
}
