//! A personal finance tracker core: accounts with append-only transaction
//! histories, per-category budgets with derived spending figures, chart-ready
//! aggregations, and a key-value snapshot store for persistence.
//!
//! The [FinanceStore] holds all accounts and budgets and hands out new
//! snapshots for every mutation. The [FinanceTracker] owns the current
//! snapshot, re-derives the budget spending after every committed change, and
//! saves through a [SnapshotStore] gateway. Chart data comes from the pure
//! functions in [dashboard].

#![warn(missing_docs)]

pub mod dashboard;
mod error;
mod model;
mod store;
mod stores;
mod tracker;

pub use error::Error;
pub use model::{
    Account, AccountId, Budget, BudgetStatus, Transaction, TransactionBuilder, TransactionKind,
    UNCATEGORIZED,
};
pub use store::FinanceStore;
pub use stores::{SnapshotStore, sqlite::SqliteSnapshotStore};
pub use tracker::FinanceTracker;
