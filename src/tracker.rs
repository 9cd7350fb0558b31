//! The application layer tying the store, the derived views, and the
//! persistence gateway together.

use crate::{
    Error, FinanceStore, dashboard,
    dashboard::{AccountBalance, CategoryTotal, DailyTotal},
    model::{Budget, TransactionBuilder},
    stores::SnapshotStore,
};

/// Owns the current [FinanceStore] snapshot and the [SnapshotStore] gateway.
///
/// Every user action runs the same way: build the next store snapshot,
/// re-derive the budget spending on it, save it, then make it current. Saves
/// are fire-and-forget: a failure is logged and the in-memory state is kept,
/// so the tracker keeps working without storage. Derived views always read
/// the committed snapshot, so they reflect every change as soon as it lands.
pub struct FinanceTracker<S: SnapshotStore> {
    store: FinanceStore,
    snapshots: S,
}

impl<S: SnapshotStore> FinanceTracker<S> {
    /// Load the saved state from `snapshots`.
    ///
    /// Falls back to the starter accounts and budgets when nothing usable
    /// was saved. Budget spending is re-derived from the loaded history, so
    /// a stale or hand-edited `spent` figure never survives a load.
    pub fn load(snapshots: S) -> Self {
        let store = snapshots.load().recompute_budgets();

        FinanceTracker { store, snapshots }
    }

    /// The current store snapshot.
    pub fn store(&self) -> &FinanceStore {
        &self.store
    }

    /// The current budgets, with spending figures up to date.
    pub fn budgets(&self) -> &[Budget] {
        &self.store.budgets
    }

    /// Daily income and expense totals for the time-series chart.
    pub fn daily_totals(&self) -> Vec<DailyTotal> {
        dashboard::daily_totals(&self.store.accounts)
    }

    /// Expense totals per category for the breakdown chart.
    pub fn expense_by_category(&self) -> Vec<CategoryTotal> {
        dashboard::expense_by_category(&self.store.accounts)
    }

    /// Account names and balances for the balance chart.
    pub fn account_balances(&self) -> Vec<AccountBalance> {
        dashboard::account_balances(&self.store.accounts)
    }

    /// Add a new account. See [FinanceStore::with_account].
    ///
    /// # Errors
    /// Returns the validation error with no state changed.
    pub fn add_account(&mut self, name: &str, balance: f64) -> Result<(), Error> {
        let store = self.store.with_account(name, balance)?;
        self.commit(store);

        Ok(())
    }

    /// Rename an account or manually set its balance. See
    /// [FinanceStore::with_account_edited].
    ///
    /// # Errors
    /// Returns the validation error with no state changed.
    pub fn edit_account(&mut self, id: &str, name: &str, balance: f64) -> Result<(), Error> {
        let store = self.store.with_account_edited(id, name, balance)?;
        self.commit(store);

        Ok(())
    }

    /// Delete an account and its transaction history.
    pub fn delete_account(&mut self, id: &str) {
        let store = self.store.without_account(id);
        self.commit(store);
    }

    /// Record a transaction against an account. See
    /// [FinanceStore::record_transaction].
    ///
    /// # Errors
    /// Returns the validation error with no state changed.
    pub fn record_transaction(
        &mut self,
        account_id: &str,
        builder: TransactionBuilder,
    ) -> Result<(), Error> {
        let store = self.store.record_transaction(account_id, builder)?;
        self.commit(store);

        Ok(())
    }

    /// Add a budget for a category. See [FinanceStore::with_budget].
    ///
    /// # Errors
    /// Returns the validation error with no state changed.
    pub fn add_budget(&mut self, category: &str, limit: f64) -> Result<(), Error> {
        let store = self.store.with_budget(category, limit)?;
        self.commit(store);

        Ok(())
    }

    /// Delete the budget for a category, if `confirm` approves.
    pub fn delete_budget(&mut self, category: &str, confirm: impl FnOnce(&str) -> bool) {
        let store = self.store.without_budget(category, confirm);
        self.commit(store);
    }

    /// Clear all saved state and restore the starter accounts and budgets,
    /// if `confirm` approves.
    pub fn reset(&mut self, confirm: impl FnOnce() -> bool) {
        if !confirm() {
            return;
        }

        if let Err(error) = self.snapshots.clear() {
            tracing::warn!("could not clear saved state: {error}");
        }

        self.commit(FinanceStore::starter());
    }

    /// Make `store` the current snapshot: re-derive the budget spending,
    /// save, then swap.
    ///
    /// A failed save never rolls back the in-memory mutation; the next
    /// successful save catches the storage up.
    fn commit(&mut self, store: FinanceStore) {
        let store = store.recompute_budgets();

        if let Err(error) = self.snapshots.save(&store) {
            tracing::warn!("could not save snapshot, continuing in memory: {error}");
        }

        self.store = store;
    }
}
