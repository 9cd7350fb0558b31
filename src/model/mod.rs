//! Defines the domain records: accounts, transactions, and budgets.

mod account;
mod budget;
mod transaction;

pub use account::{Account, AccountId};
pub use budget::{Budget, BudgetStatus};
pub use transaction::{Transaction, TransactionBuilder, TransactionKind, UNCATEGORIZED};

pub(crate) use transaction::next_record_id;
