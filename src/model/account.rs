//! Defines the account record: a named balance with a transaction history.

use serde::{Deserialize, Serialize};

use crate::model::Transaction;

/// Identifies an account within the store.
pub type AccountId = String;

/// A named ledger holding a balance and an append-only transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The id for the account, unique within the store.
    pub id: AccountId,
    /// The display name of the account.
    pub name: String,
    /// The current balance: the balance the account was created with plus the
    /// signed sum of every recorded transaction.
    pub balance: f64,
    /// Every transaction recorded against this account, in entry order.
    ///
    /// Snapshots written by the account form omit this field, so it defaults
    /// to empty.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    /// Create an account with no transaction history.
    pub fn new(id: impl Into<AccountId>, name: &str, balance: f64) -> Self {
        Account {
            id: id.into(),
            name: name.to_owned(),
            balance,
            transactions: Vec::new(),
        }
    }
}
