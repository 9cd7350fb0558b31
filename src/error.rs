//! Defines the app level error type.

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction or balance amount was zero, negative, or not a number.
    ///
    /// Amounts are always entered as positive numbers, the direction of a
    /// transaction is carried by its kind.
    #[error("{0} is not a valid amount")]
    InvalidAmount(f64),

    /// A transaction was recorded without a category where the caller's form
    /// policy requires one.
    #[error("a category must be selected or entered")]
    MissingCategory,

    /// An empty string was used as an account name.
    #[error("account name cannot be empty")]
    EmptyAccountName,

    /// A transaction was recorded while the store holds no accounts.
    #[error("an account must be added before recording transactions")]
    NoAccounts,

    /// A budget limit was zero, negative, or not a number.
    #[error("{0} is not a valid budget limit")]
    InvalidLimit(f64),

    /// An empty string was used as a budget category.
    #[error("budget category cannot be empty")]
    EmptyBudgetCategory,

    /// A budget was added for a category that already has one.
    ///
    /// Budget categories are unique; the existing budget must be deleted
    /// before a new limit can be set for the same category.
    #[error("the category \"{0}\" already has a budget")]
    DuplicateBudgetCategory(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while serializing a snapshot as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
