//! Reconciliation service
//!
//! Joins a month's budget against the ledger entries that fall in that month
//! and produces budget/spent totals, earnings and the variance. Nothing here
//! writes to storage.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::TallyResult;
use crate::models::{CategoryPlan, Money, Month, MonthBudget, Transaction};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Whether a month's spending exceeded its budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Over,
    Under,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Over => write!(f, "over"),
            BudgetStatus::Under => write!(f, "under"),
        }
    }
}

/// Planned versus actual figures for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationSummary {
    pub month: Month,
    /// Sum of every budget line
    pub budget_total: Money,
    /// Sum of every ledger amount in the month, earnings included
    pub spent_total: Money,
    /// Sum of ledger amounts in the Earnings category
    pub earnings_total: Money,
    /// `spent_total - budget_total`
    pub diff: Money,
    pub status: BudgetStatus,
    /// Spent amounts per category and subcategory
    pub spent: CategoryPlan,
    pub transaction_count: usize,
}

impl ReconciliationSummary {
    /// Compute a summary from a budget and the full ledger
    ///
    /// Transactions outside `month` are ignored. Spending equal to the budget
    /// counts as under.
    pub fn compute(month: Month, budget: &MonthBudget, transactions: &[Transaction]) -> Self {
        let mut spent = CategoryPlan::new();
        let mut spent_total = Money::zero();
        let mut earnings_total = Money::zero();
        let mut transaction_count = 0;

        for txn in transactions.iter().filter(|t| t.month() == month) {
            spent.add(&txn.category, &txn.subcategory, txn.amount);
            spent_total += txn.amount;
            if txn.is_earnings() {
                earnings_total += txn.amount;
            }
            transaction_count += 1;
        }

        let budget_total = budget.total();
        let status = if spent_total > budget_total {
            BudgetStatus::Over
        } else {
            BudgetStatus::Under
        };

        Self {
            month,
            budget_total,
            spent_total,
            earnings_total,
            diff: spent_total - budget_total,
            status,
            spent,
            transaction_count,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == BudgetStatus::Over
    }
}

/// Service for budget-versus-ledger reconciliation
pub struct ReconciliationService<'a> {
    storage: &'a Storage,
}

impl<'a> ReconciliationService<'a> {
    /// Create a new reconciliation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Summarize one month
    ///
    /// Never creates the month's budget; an unbudgeted month has a budget
    /// total of zero. The ledger is re-read from disk on every call.
    pub fn summarize(&self, month: Month) -> TallyResult<ReconciliationSummary> {
        let budget = BudgetService::new(self.storage).get_budget(month)?;
        let transactions = self.storage.ledger.load()?;
        let summary = ReconciliationSummary::compute(month, &budget, &transactions);
        debug!(%month, spent = %summary.spent_total, budget = %summary.budget_total, "Summarized month");
        Ok(summary)
    }

    /// Summarize every budgeted month, ascending
    pub fn summarize_all(&self) -> TallyResult<Vec<ReconciliationSummary>> {
        let budgets = BudgetService::new(self.storage);
        let transactions = self.storage.ledger.load()?;

        budgets
            .list_months()?
            .into_iter()
            .map(|month| {
                let budget = budgets.get_budget(month)?;
                Ok(ReconciliationSummary::compute(month, &budget, &transactions))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, TallyPaths};
    use crate::models::Category;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, &Settings::default()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn write_ledger(storage: &Storage, body: &str) {
        std::fs::write(
            storage.ledger.path(),
            format!("Date,Category,Subcategory,Amount,Description\n{}", body),
        )
        .unwrap();
    }

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn txn(date: &str, category: Category, sub: &str, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            sub,
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_compute_under_budget() {
        let mut budget = MonthBudget::with_all_categories();
        budget.set(Category::Shopping, "Kids", Money::from_units(60));
        budget.set(Category::Home, "Rent", Money::from_units(40));

        let txns = vec![
            txn("2025-03-02", Category::Shopping, "Kids", 5000),
            txn("2025-03-20", Category::Shopping, "Toys", 3000),
            txn("2025-04-01", Category::Shopping, "Kids", 99900),
        ];

        let summary = ReconciliationSummary::compute(month("2025-03"), &budget, &txns);
        assert_eq!(summary.spent_total, Money::from_units(80));
        assert_eq!(summary.budget_total, Money::from_units(100));
        assert_eq!(summary.diff, Money::from_units(-20));
        assert_eq!(summary.status, BudgetStatus::Under);
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(
            summary.spent.get(&Category::Shopping, "Toys"),
            Some(Money::from_units(30))
        );
    }

    #[test]
    fn test_equal_spend_is_under() {
        let mut budget = MonthBudget::new();
        budget.set(Category::Home, "Rent", Money::from_units(900));
        let txns = vec![txn("2025-01-01", Category::Home, "Rent", 90000)];

        let summary = ReconciliationSummary::compute(month("2025-01"), &budget, &txns);
        assert_eq!(summary.diff, Money::zero());
        assert_eq!(summary.status, BudgetStatus::Under);

        let txns = vec![txn("2025-01-01", Category::Home, "Rent", 90001)];
        let summary = ReconciliationSummary::compute(month("2025-01"), &budget, &txns);
        assert!(summary.is_over());
        assert_eq!(summary.diff, Money::from_cents(1));
    }

    #[test]
    fn test_earnings_count_towards_spent() {
        let budget = MonthBudget::with_all_categories();
        let txns = vec![
            txn("2025-02-01", Category::Earnings, "Salary", 200000),
            txn("2025-02-03", Category::Utilities, "Power", 10000),
        ];

        let summary = ReconciliationSummary::compute(month("2025-02"), &budget, &txns);
        assert_eq!(summary.earnings_total, Money::from_units(2000));
        assert_eq!(summary.spent_total, Money::from_units(2100));
        assert!(summary.is_over());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(BudgetStatus::Over).unwrap(), "over");
        assert_eq!(BudgetStatus::Under.to_string(), "under");
    }

    #[test]
    fn test_summarize_unbudgeted_month() {
        let (_temp_dir, storage) = create_test_storage();
        write_ledger(&storage, "2025-05-01,Shopping,Kids,12.50,\n");

        let summary = ReconciliationService::new(&storage)
            .summarize(month("2025-05"))
            .unwrap();
        assert_eq!(summary.budget_total, Money::zero());
        assert_eq!(summary.spent_total, Money::from_cents(1250));
        assert!(summary.is_over());

        // summarizing must not create the month
        assert!(storage.budgets.months().unwrap().is_empty());
    }

    #[test]
    fn test_summarize_without_ledger_file() {
        let (_temp_dir, storage) = create_test_storage();
        let summary = ReconciliationService::new(&storage)
            .summarize(month("2025-05"))
            .unwrap();
        assert_eq!(summary.spent_total, Money::zero());
        assert_eq!(summary.transaction_count, 0);
    }

    #[test]
    fn test_summarize_rereads_ledger() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReconciliationService::new(&storage);

        write_ledger(&storage, "2025-05-01,Home,Rent,10,\n");
        assert_eq!(
            service.summarize(month("2025-05")).unwrap().spent_total,
            Money::from_units(10)
        );

        write_ledger(&storage, "2025-05-01,Home,Rent,10,\n2025-05-02,Home,Water,5,\n");
        assert_eq!(
            service.summarize(month("2025-05")).unwrap().spent_total,
            Money::from_units(15)
        );
    }

    #[test]
    fn test_summarize_counts_unrecognised_categories() {
        let (_temp_dir, storage) = create_test_storage();
        write_ledger(
            &storage,
            "2025-03-01,Shopping,Kids,80,\n2025-03-02,Travel,Flights,20,\n",
        );

        let summary = ReconciliationService::new(&storage)
            .summarize(month("2025-03"))
            .unwrap();
        assert_eq!(summary.spent_total, Money::from_units(100));
        assert_eq!(summary.earnings_total, Money::zero());
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(
            summary.spent.get(&Category::Other("Travel".into()), "Flights"),
            Some(Money::from_units(20))
        );
    }

    #[test]
    fn test_summarize_malformed_ledger_fails() {
        let (_temp_dir, storage) = create_test_storage();
        write_ledger(&storage, "2025-13-45,Home,Rent,10,\n");

        let err = ReconciliationService::new(&storage)
            .summarize(month("2025-05"))
            .unwrap_err();
        assert!(err.is_malformed_record());
    }

    #[test]
    fn test_summarize_all_in_month_order() {
        let (_temp_dir, storage) = create_test_storage();
        let budgets = BudgetService::new(&storage);
        for m in ["2025-02", "2024-12"] {
            let mut plan = MonthBudget::new();
            plan.set(Category::Home, "Rent", Money::from_units(100));
            budgets.set_budget(month(m), plan).unwrap();
        }
        write_ledger(
            &storage,
            "2024-12-05,Home,Rent,150,\n2025-02-05,Home,Rent,50,\n2025-03-01,Home,Rent,1,\n",
        );

        let summaries = ReconciliationService::new(&storage).summarize_all().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].month, month("2024-12"));
        assert!(summaries[0].is_over());
        assert_eq!(summaries[1].month, month("2025-02"));
        assert_eq!(summaries[1].status, BudgetStatus::Under);
        for s in &summaries {
            assert_eq!(s.diff, s.spent_total - s.budget_total);
        }
    }
}
