//! Transaction data aggregation and transformation for charts.
//!
//! Three independent derivations feed the spending visualizations: daily
//! income/expense totals, expense totals per category, and a per-account
//! balance snapshot. Each is a pure function of the current accounts and
//! yields an empty result when there is nothing to chart.

use std::collections::HashMap;

use time::Date;

use crate::model::{Account, TransactionKind};

/// Income and expense totals for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    /// The calendar date of the bucket.
    pub date: Date,
    /// Total income recorded on this date.
    pub income: f64,
    /// Total expenses recorded on this date.
    pub expense: f64,
}

/// Total expenses for one category, as a name/value pair for pie charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category name.
    pub name: String,
    /// The total expense amount in this category.
    pub value: f64,
}

/// An account's name and current balance, for the balance chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
    /// The account name.
    pub name: String,
    /// The account's current balance.
    pub balance: f64,
}

/// Aggregates all transactions across all accounts by calendar date.
///
/// The date is taken from each transaction's stored timestamp in its own
/// offset. Income and expenses are summed separately per bucket.
///
/// # Returns
/// Buckets sorted ascending by date.
pub fn daily_totals(accounts: &[Account]) -> Vec<DailyTotal> {
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for account in accounts {
        for transaction in &account.transactions {
            let entry = totals.entry(transaction.date.date()).or_insert((0.0, 0.0));

            match transaction.kind {
                TransactionKind::Income => entry.0 += transaction.amount,
                TransactionKind::Expense => entry.1 += transaction.amount,
            }
        }
    }

    let mut buckets: Vec<DailyTotal> = totals
        .into_iter()
        .map(|(date, (income, expense))| DailyTotal {
            date,
            income,
            expense,
        })
        .collect();
    buckets.sort_by_key(|bucket| bucket.date);

    buckets
}

/// Sums expense amounts per category across every account.
///
/// Transactions recorded without a category count towards
/// [UNCATEGORIZED](crate::UNCATEGORIZED).
pub fn spending_by_category(accounts: &[Account]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();

    for account in accounts {
        for transaction in account
            .transactions
            .iter()
            .filter(|transaction| transaction.kind == TransactionKind::Expense)
        {
            *totals
                .entry(transaction.category_label().to_owned())
                .or_insert(0.0) += transaction.amount;
        }
    }

    totals
}

/// Groups expense transactions by category as name/value pairs.
///
/// # Returns
/// One entry per non-empty category, in no particular order.
pub fn expense_by_category(accounts: &[Account]) -> Vec<CategoryTotal> {
    spending_by_category(accounts)
        .into_iter()
        .map(|(name, value)| CategoryTotal { name, value })
        .collect()
}

/// Each account's name and balance, in store order.
pub fn account_balances(accounts: &[Account]) -> Vec<AccountBalance> {
    accounts
        .iter()
        .map(|account| AccountBalance {
            name: account.name.clone(),
            balance: account.balance,
        })
        .collect()
}

/// Formats dates as short chart axis labels, e.g. "Jan 5".
pub fn format_date_labels(dates: &[Date]) -> Vec<String> {
    use time::Month;

    let date_to_label = |date: &Date| {
        let month = match date.month() {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        };

        format!("{month} {}", date.day())
    };

    dates.iter().map(date_to_label).collect()
}
