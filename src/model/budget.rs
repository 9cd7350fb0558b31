//! Defines the budget record: a spending cap for one expense category.

use serde::{Deserialize, Serialize};

/// How far through its limit a budget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Spending has reached or passed the limit.
    OverBudget,
    /// Spending has reached 80% of the limit but not yet 100%.
    ApproachingLimit,
    /// Spending is comfortably within the limit.
    Ok,
}

/// A user-defined spending cap for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The expense category this cap applies to. Unique across budgets.
    pub category: String,
    /// The spending cap.
    pub limit: f64,
    /// How much has been spent in this category across all accounts.
    ///
    /// Derived from the transaction history by
    /// [FinanceStore::recompute_budgets](crate::FinanceStore::recompute_budgets),
    /// never edited directly.
    #[serde(default)]
    pub spent: f64,
}

impl Budget {
    /// Create a budget with nothing spent against it yet.
    pub fn new(category: &str, limit: f64) -> Self {
        Budget {
            category: category.to_owned(),
            limit,
            spent: 0.0,
        }
    }

    /// Spending as a percentage of the limit.
    ///
    /// A non-positive limit yields 0 rather than dividing by zero.
    pub fn percent_used(&self) -> f64 {
        if self.limit <= 0.0 {
            0.0
        } else {
            self.spent / self.limit * 100.0
        }
    }

    /// Where the budget sits relative to its limit: at or past 100% it is
    /// over budget, from 80% it is approaching the limit.
    pub fn status(&self) -> BudgetStatus {
        let percent = self.percent_used();

        if percent >= 100.0 {
            BudgetStatus::OverBudget
        } else if percent >= 80.0 {
            BudgetStatus::ApproachingLimit
        } else {
            BudgetStatus::Ok
        }
    }
}

#[cfg(test)]
mod budget_tests {
    use crate::model::budget::{Budget, BudgetStatus};

    fn budget_with_spent(limit: f64, spent: f64) -> Budget {
        Budget {
            spent,
            ..Budget::new("Groceries", limit)
        }
    }

    #[test]
    fn percent_used_is_spent_over_limit() {
        let budget = budget_with_spent(300.0, 50.0);

        let percent = budget.percent_used();

        assert!((percent - 16.666_666).abs() < 0.001, "got {percent}");
    }

    #[test]
    fn percent_used_is_zero_for_zero_limit() {
        let budget = budget_with_spent(0.0, 50.0);

        assert_eq!(budget.percent_used(), 0.0);
    }

    #[test]
    fn status_thresholds() {
        let cases = [
            (100.0, 0.0, BudgetStatus::Ok),
            (100.0, 79.99, BudgetStatus::Ok),
            (100.0, 80.0, BudgetStatus::ApproachingLimit),
            (100.0, 99.99, BudgetStatus::ApproachingLimit),
            (100.0, 100.0, BudgetStatus::OverBudget),
            (100.0, 150.0, BudgetStatus::OverBudget),
        ];

        for (limit, spent, want) in cases {
            let got = budget_with_spent(limit, spent).status();
            assert_eq!(got, want, "limit {limit}, spent {spent}");
        }
    }
}
