//! Defines the core transaction record and its builder.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// The category label that transactions recorded without a category are
/// aggregated under.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether a transaction took money out of an account or put money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent from an account.
    Expense,
    /// Money earned into an account.
    Income,
}

/// A single monetary event recorded against one account.
///
/// Transactions are immutable once created and are only ever appended to an
/// account's history, so the history reads in entry order rather than date
/// order.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Millisecond clock id, unique within a session.
    pub id: i64,
    /// Whether the amount was spent or earned.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The amount of money spent or earned. Always positive, the direction
    /// is carried by `kind`.
    pub amount: f64,
    /// The spending category, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// A free-text note on what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// When the transaction happened.
    ///
    /// Defaults to the time of entry; a user-supplied date replaces it, but
    /// the `id` always comes from the clock at entry time.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Start building a new transaction.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let builder = Transaction::build(TransactionKind::Expense, 45.99)
    ///     .category("Groceries")
    ///     .description("Weekly shop");
    /// ```
    pub fn build(kind: TransactionKind, amount: f64) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            category: None,
            description: String::new(),
            date: None,
            category_required: false,
        }
    }

    /// The amount with its direction applied: positive for income, negative
    /// for expense.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// The category to aggregate this transaction under.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// A builder for creating [Transaction] values.
///
/// Optional fields default to sensible values: no category, an empty
/// description, and the current time as the date. Validation happens when the
/// builder is finalised by the recorder, so an invalid amount never mutates
/// any account.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    kind: TransactionKind,
    amount: f64,
    category: Option<String>,
    description: String,
    date: Option<OffsetDateTime>,
    category_required: bool,
}

impl TransactionBuilder {
    /// Set the spending category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the date for the transaction instead of the time of entry.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Make a missing category a validation error.
    ///
    /// The entry form treats the category as mandatory; callers recording
    /// transactions from other sources can leave it optional.
    pub fn require_category(mut self) -> Self {
        self.category_required = true;
        self
    }

    /// Validate the builder and produce a [Transaction] with a fresh clock id.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is not a positive, finite
    /// number, or [Error::MissingCategory] if a category is required but
    /// blank.
    pub(crate) fn finalise(self) -> Result<Transaction, Error> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        let category = self.category.filter(|category| !category.trim().is_empty());

        if self.category_required && category.is_none() {
            return Err(Error::MissingCategory);
        }

        Ok(Transaction {
            id: next_record_id(),
            kind: self.kind,
            amount: self.amount,
            category,
            description: self.description,
            date: self.date.unwrap_or_else(OffsetDateTime::now_utc),
        })
    }
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// The current wall clock in milliseconds, bumped past the previous id when
/// two records land on the same tick so ids stay unique within a session.
pub(crate) fn next_record_id() -> i64 {
    let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let mut last = LAST_ID.load(Ordering::Relaxed);

    loop {
        let next = now.max(last + 1);
        match LAST_ID.compare_exchange(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

#[cfg(test)]
mod builder_tests {
    use time::macros::datetime;

    use crate::{Error, model::transaction::{Transaction, TransactionKind}};

    #[test]
    fn finalise_succeeds_with_defaults() {
        let transaction = Transaction::build(TransactionKind::Expense, 12.5)
            .finalise()
            .expect("Could not finalise transaction");

        assert_eq!(transaction.amount, 12.5);
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.category, None);
        assert_eq!(transaction.category_label(), "Uncategorized");
        assert_eq!(transaction.description, "");
    }

    #[test]
    fn finalise_rejects_non_positive_amounts() {
        for amount in [0.0, -10.0] {
            let result = Transaction::build(TransactionKind::Income, amount).finalise();
            assert_eq!(result, Err(Error::InvalidAmount(amount)));
        }
    }

    #[test]
    fn finalise_rejects_non_numeric_amounts() {
        for amount in [f64::NAN, f64::INFINITY] {
            let result = Transaction::build(TransactionKind::Income, amount).finalise();
            assert!(matches!(result, Err(Error::InvalidAmount(_))));
        }
    }

    #[test]
    fn finalise_rejects_missing_required_category() {
        let result = Transaction::build(TransactionKind::Expense, 10.0)
            .require_category()
            .finalise();

        assert_eq!(result, Err(Error::MissingCategory));
    }

    #[test]
    fn finalise_treats_blank_required_category_as_missing() {
        let result = Transaction::build(TransactionKind::Expense, 10.0)
            .category("   ")
            .require_category()
            .finalise();

        assert_eq!(result, Err(Error::MissingCategory));
    }

    #[test]
    fn supplied_date_replaces_entry_time() {
        let date = datetime!(2024-01-15 09:30 UTC);

        let transaction = Transaction::build(TransactionKind::Income, 100.0)
            .date(date)
            .finalise()
            .expect("Could not finalise transaction");

        assert_eq!(transaction.date, date);
    }

    #[test]
    fn signed_amount_follows_kind() {
        let income = Transaction::build(TransactionKind::Income, 25.0)
            .finalise()
            .unwrap();
        let expense = Transaction::build(TransactionKind::Expense, 25.0)
            .finalise()
            .unwrap();

        assert_eq!(income.signed_amount(), 25.0);
        assert_eq!(expense.signed_amount(), -25.0);
    }
}
