//! The in-memory store of accounts and budgets, and the operations that turn
//! user actions into new store snapshots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Error, dashboard,
    model::{Account, Budget, TransactionBuilder, next_record_id},
};

/// The full application state: every account and every budget.
///
/// Mutating operations take `&self` and return a fresh snapshot, leaving the
/// original untouched. The [FinanceTracker](crate::FinanceTracker) decides
/// when a snapshot becomes current, re-derives the budget spending on it, and
/// persists it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinanceStore {
    /// All accounts, in creation order.
    pub accounts: Vec<Account>,
    /// All budgets, in creation order.
    pub budgets: Vec<Budget>,
}

impl FinanceStore {
    /// The hardcoded starting state: two empty accounts and three budgets.
    ///
    /// Used on first run and whenever saved state cannot be loaded.
    pub fn starter() -> Self {
        FinanceStore {
            accounts: vec![
                Account::new("checking", "Main Checking", 0.0),
                Account::new("savings", "Savings Account", 0.0),
            ],
            budgets: vec![
                Budget::new("Groceries", 300.0),
                Budget::new("Dining Out", 200.0),
                Budget::new("Transportation", 150.0),
            ],
        }
    }

    /// Look up an account by id.
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Add a new account with the given starting balance.
    ///
    /// # Errors
    /// Returns [Error::EmptyAccountName] if `name` is blank, or
    /// [Error::InvalidAmount] if `balance` is not a number.
    pub fn with_account(&self, name: &str, balance: f64) -> Result<FinanceStore, Error> {
        if name.trim().is_empty() {
            return Err(Error::EmptyAccountName);
        }

        if !balance.is_finite() {
            return Err(Error::InvalidAmount(balance));
        }

        let mut store = self.clone();
        store
            .accounts
            .push(Account::new(next_record_id().to_string(), name, balance));

        Ok(store)
    }

    /// Rename an account and/or manually set its balance.
    ///
    /// A manual balance edit re-bases the account: the new balance counts as
    /// the starting balance plus everything recorded so far.
    ///
    /// Editing an id that does not exist changes nothing.
    ///
    /// # Errors
    /// Returns [Error::EmptyAccountName] if `name` is blank, or
    /// [Error::InvalidAmount] if `balance` is not a number.
    pub fn with_account_edited(
        &self,
        id: &str,
        name: &str,
        balance: f64,
    ) -> Result<FinanceStore, Error> {
        if name.trim().is_empty() {
            return Err(Error::EmptyAccountName);
        }

        if !balance.is_finite() {
            return Err(Error::InvalidAmount(balance));
        }

        let mut store = self.clone();

        match store.accounts.iter_mut().find(|account| account.id == id) {
            Some(account) => {
                account.name = name.to_owned();
                account.balance = balance;
            }
            None => tracing::warn!("tried to edit account {id}, which does not exist"),
        }

        Ok(store)
    }

    /// Delete an account and its transaction history.
    ///
    /// Deleting an id that does not exist changes nothing.
    pub fn without_account(&self, id: &str) -> FinanceStore {
        let mut store = self.clone();
        let count_before = store.accounts.len();
        store.accounts.retain(|account| account.id != id);

        if store.accounts.len() == count_before {
            tracing::warn!("tried to delete account {id}, which does not exist");
        }

        store
    }

    /// Record a transaction against an account.
    ///
    /// The account's balance and its transaction history change together in
    /// the returned snapshot; a failed validation returns an error with
    /// nothing half-applied. Recording against an id that does not exist
    /// changes nothing.
    ///
    /// # Errors
    /// Returns [Error::NoAccounts] if the store holds no accounts,
    /// [Error::InvalidAmount] if the amount is not a positive, finite number,
    /// or [Error::MissingCategory] if the builder requires a category and
    /// none was given.
    pub fn record_transaction(
        &self,
        account_id: &str,
        builder: TransactionBuilder,
    ) -> Result<FinanceStore, Error> {
        if self.accounts.is_empty() {
            return Err(Error::NoAccounts);
        }

        let transaction = builder.finalise()?;
        let mut store = self.clone();

        match store
            .accounts
            .iter_mut()
            .find(|account| account.id == account_id)
        {
            Some(account) => {
                account.balance += transaction.signed_amount();
                account.transactions.push(transaction);
            }
            None => tracing::warn!(
                "tried to record a transaction against account {account_id}, which does not exist"
            ),
        }

        Ok(store)
    }

    /// Add a budget for a category, with `spent` derived from the current
    /// transaction history.
    ///
    /// # Errors
    /// Returns [Error::EmptyBudgetCategory] if `category` is blank,
    /// [Error::InvalidLimit] if `limit` is not a positive, finite number, or
    /// [Error::DuplicateBudgetCategory] if the category already has a budget.
    pub fn with_budget(&self, category: &str, limit: f64) -> Result<FinanceStore, Error> {
        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyBudgetCategory);
        }

        if !limit.is_finite() || limit <= 0.0 {
            return Err(Error::InvalidLimit(limit));
        }

        if self.budgets.iter().any(|budget| budget.category == category) {
            return Err(Error::DuplicateBudgetCategory(category.to_owned()));
        }

        let mut budget = Budget::new(category, limit);
        budget.spent = self
            .spending_by_category()
            .get(category)
            .copied()
            .unwrap_or(0.0);

        let mut store = self.clone();
        store.budgets.push(budget);

        Ok(store)
    }

    /// Delete the budget for a category, if `confirm` approves.
    ///
    /// `confirm` is handed the category name and stands in for a user-facing
    /// confirmation prompt. Declining, or naming a category with no budget,
    /// changes nothing.
    pub fn without_budget(
        &self,
        category: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> FinanceStore {
        if !confirm(category) {
            return self.clone();
        }

        let mut store = self.clone();
        let count_before = store.budgets.len();
        store.budgets.retain(|budget| budget.category != category);

        if store.budgets.len() == count_before {
            tracing::warn!("tried to delete the budget for {category}, which does not exist");
        }

        store
    }

    /// Total expense amounts per category across every account.
    pub fn spending_by_category(&self) -> HashMap<String, f64> {
        dashboard::spending_by_category(&self.accounts)
    }

    /// Re-derive every budget's `spent` figure from the transaction history.
    ///
    /// Budget categories with no matching expenses get 0. Idempotent:
    /// recomputing an already up-to-date store returns an equal store. Runs
    /// after every committed mutation.
    pub fn recompute_budgets(&self) -> FinanceStore {
        let spending = self.spending_by_category();
        let mut store = self.clone();

        for budget in &mut store.budgets {
            budget.spent = spending.get(&budget.category).copied().unwrap_or(0.0);
        }

        store
    }
}

#[cfg(test)]
mod account_tests {
    use crate::{Error, store::FinanceStore};

    #[test]
    fn starter_has_two_accounts_and_three_budgets() {
        let store = FinanceStore::starter();

        assert_eq!(store.accounts.len(), 2);
        assert_eq!(store.accounts[0].id, "checking");
        assert_eq!(store.accounts[1].id, "savings");
        assert_eq!(store.budgets.len(), 3);
        assert_eq!(store.budgets[0].category, "Groceries");
        assert_eq!(store.budgets[0].limit, 300.0);
    }

    #[test]
    fn with_account_appends_and_leaves_original_untouched() {
        let store = FinanceStore::default();

        let updated = store
            .with_account("Main Checking", 1000.0)
            .expect("Could not add account");

        assert!(store.accounts.is_empty());
        assert_eq!(updated.accounts.len(), 1);
        assert_eq!(updated.accounts[0].name, "Main Checking");
        assert_eq!(updated.accounts[0].balance, 1000.0);
        assert!(updated.accounts[0].transactions.is_empty());
    }

    #[test]
    fn with_account_generates_unique_ids() {
        let store = FinanceStore::default()
            .with_account("A", 0.0)
            .unwrap()
            .with_account("B", 0.0)
            .unwrap();

        assert_ne!(store.accounts[0].id, store.accounts[1].id);
    }

    #[test]
    fn with_account_rejects_blank_name() {
        let result = FinanceStore::default().with_account("  ", 100.0);

        assert_eq!(result, Err(Error::EmptyAccountName));
    }

    #[test]
    fn with_account_edited_updates_name_and_balance() {
        let store = FinanceStore::starter();

        let updated = store
            .with_account_edited("checking", "Everyday", 250.0)
            .expect("Could not edit account");

        assert_eq!(updated.accounts[0].name, "Everyday");
        assert_eq!(updated.accounts[0].balance, 250.0);
        // The other account is untouched.
        assert_eq!(updated.accounts[1], store.accounts[1]);
    }

    #[test]
    fn with_account_edited_missing_id_is_a_no_op() {
        let store = FinanceStore::starter();

        let updated = store
            .with_account_edited("no-such-id", "Everyday", 250.0)
            .expect("Editing a missing account should not error");

        assert_eq!(updated, store);
    }

    #[test]
    fn without_account_removes_only_the_target() {
        let store = FinanceStore::starter();

        let updated = store.without_account("checking");

        assert_eq!(updated.accounts.len(), 1);
        assert_eq!(updated.accounts[0].id, "savings");
    }

    #[test]
    fn without_account_missing_id_is_a_no_op() {
        let store = FinanceStore::starter();

        let updated = store.without_account("no-such-id");

        assert_eq!(updated, store);
    }
}


#[cfg(test)]
mod budget_tests {
    use crate::{
        Error,
        model::{Transaction, TransactionKind},
        store::FinanceStore,
    };

    #[test]
    fn with_budget_rejects_duplicate_category() {
        let store = FinanceStore::starter();

        let result = store.with_budget("Groceries", 500.0);

        assert_eq!(
            result,
            Err(Error::DuplicateBudgetCategory("Groceries".to_owned()))
        );
        // The budget list is unchanged.
        assert_eq!(store.budgets.len(), 3);
    }

    #[test]
    fn with_budget_rejects_non_positive_limit() {
        let store = FinanceStore::default();

        assert_eq!(
            store.with_budget("Travel", 0.0),
            Err(Error::InvalidLimit(0.0))
        );
        assert_eq!(
            store.with_budget("Travel", -10.0),
            Err(Error::InvalidLimit(-10.0))
        );
    }

    #[test]
    fn with_budget_rejects_blank_category() {
        let result = FinanceStore::default().with_budget("  ", 100.0);

        assert_eq!(result, Err(Error::EmptyBudgetCategory));
    }

    #[test]
    fn with_budget_initialises_spent_from_history() {
        let store = FinanceStore::starter()
            .record_transaction(
                "checking",
                Transaction::build(TransactionKind::Expense, 75.0).category("Travel"),
            )
            .unwrap();

        let updated = store.with_budget("Travel", 500.0).unwrap();

        let budget = updated.budgets.last().unwrap();
        assert_eq!(budget.category, "Travel");
        assert_eq!(budget.spent, 75.0);
    }

    #[test]
    fn without_budget_requires_confirmation() {
        let store = FinanceStore::starter();

        let declined = store.without_budget("Groceries", |_| false);
        assert_eq!(declined.budgets.len(), 3);

        let confirmed = store.without_budget("Groceries", |category| {
            assert_eq!(category, "Groceries");
            true
        });
        assert_eq!(confirmed.budgets.len(), 2);
        assert!(
            confirmed
                .budgets
                .iter()
                .all(|budget| budget.category != "Groceries")
        );
    }

    #[test]
    fn recompute_budgets_matches_expense_history() {
        let store = FinanceStore::starter()
            .record_transaction(
                "checking",
                Transaction::build(TransactionKind::Expense, 50.0).category("Groceries"),
            )
            .unwrap()
            .record_transaction(
                "savings",
                Transaction::build(TransactionKind::Expense, 25.0).category("Groceries"),
            )
            .unwrap()
            .record_transaction(
                "checking",
                Transaction::build(TransactionKind::Income, 500.0).category("Groceries"),
            )
            .unwrap();

        let recomputed = store.recompute_budgets();

        let groceries = &recomputed.budgets[0];
        assert_eq!(groceries.category, "Groceries");
        // Income in the same category does not count towards spending.
        assert_eq!(groceries.spent, 75.0);
        // Categories with no expenses stay at zero.
        assert_eq!(recomputed.budgets[1].spent, 0.0);
        assert_eq!(recomputed.budgets[2].spent, 0.0);
    }

    #[test]
    fn recompute_budgets_is_idempotent() {
        let store = FinanceStore::starter()
            .record_transaction(
                "checking",
                Transaction::build(TransactionKind::Expense, 50.0).category("Groceries"),
            )
            .unwrap();

        let once = store.recompute_budgets();
        let twice = once.recompute_budgets();

        assert_eq!(once, twice);
    }

    #[test]
    fn uncategorised_expenses_group_under_uncategorized() {
        let store = FinanceStore::starter()
            .record_transaction(
                "checking",
                Transaction::build(TransactionKind::Expense, 12.0),
            )
            .unwrap()
            .with_budget("Uncategorized", 100.0)
            .unwrap();

        let recomputed = store.recompute_budgets();

        let budget = recomputed.budgets.last().unwrap();
        assert_eq!(budget.spent, 12.0);
    }
}
