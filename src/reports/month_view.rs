//! Month View Report
//!
//! Budget versus actual for one month, drilled down to subcategories.
//! Remaining amounts are `budgeted - spent`, so a positive figure is money
//! left over.

use std::collections::BTreeSet;
use std::io::Write;

use crate::display::report::{double_separator, separator, truncate};
use crate::error::{TallyError, TallyResult};
use crate::models::{
    display_categories, Category, CategoryPlan, Money, Month, MonthBudget, Transaction,
};
use crate::services::BudgetService;
use crate::storage::Storage;

const WIDTH: usize = 64;

/// One subcategory line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub subcategory: String,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
}

/// One category with its lines and subtotals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection {
    pub category: Category,
    pub lines: Vec<ViewLine>,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
}

/// Month View Report
#[derive(Debug, Clone)]
pub struct MonthViewReport {
    pub month: Month,
    /// Every built-in category plus any other category that was budgeted or
    /// spent, in display order
    pub sections: Vec<CategorySection>,
    pub total_budget: Money,
    pub total_spent: Money,
    /// `total_budget - total_spent`
    pub total_diff: Money,
}

impl MonthViewReport {
    /// Generate the report for a month
    ///
    /// Reads the budget without creating it and re-reads the ledger.
    pub fn generate(storage: &Storage, month: Month) -> TallyResult<Self> {
        let budget = BudgetService::new(storage).get_budget(month)?;
        let transactions = storage.ledger.load()?;
        Ok(Self::build(month, &budget, &transactions))
    }

    /// Build the report from an already loaded budget and ledger
    pub fn build(month: Month, budget: &MonthBudget, transactions: &[Transaction]) -> Self {
        let mut spent = CategoryPlan::new();
        for txn in transactions.iter().filter(|t| t.month() == month) {
            spent.add(&txn.category, &txn.subcategory, txn.amount);
        }

        let sections: Vec<CategorySection> = display_categories([budget, &spent])
            .into_iter()
            .map(|category| build_section(category, budget, &spent))
            .collect();

        let total_budget = budget.total();
        let total_spent = spent.total();

        Self {
            month,
            sections,
            total_budget,
            total_spent,
            total_diff: total_budget - total_spent,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget vs Actual: {}\n", self.month));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>11} {:>11} {:>11}\n",
            "Subcategory", "Budgeted", "Spent", "Remaining"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for section in &self.sections {
            output.push_str(&format!("\n{}\n", section.category.as_str().to_uppercase()));

            if section.lines.is_empty() {
                output.push_str("  (nothing budgeted or spent)\n");
                continue;
            }

            for line in &section.lines {
                output.push_str(&format!(
                    "  {:<26} {:>11} {:>11} {:>11}\n",
                    truncate(&line.subcategory, 26),
                    line.budgeted,
                    line.spent,
                    line.remaining
                ));
            }

            output.push_str(&format!(
                "  {:<26} {:>11} {:>11} {:>11}\n",
                "Subtotal", section.budgeted, section.spent, section.remaining
            ));
        }

        output.push('\n');
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>11} {:>11} {:>11}\n",
            "TOTAL", self.total_budget, self.total_spent, self.total_diff
        ));

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per subcategory line, followed by a `TOTAL` row.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TallyResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let io_err = |e: csv::Error| TallyError::Io(e.to_string());

        wtr.write_record(["Month", "Category", "Subcategory", "Budgeted", "Spent", "Remaining"])
            .map_err(io_err)?;

        let month = self.month.to_string();
        for section in &self.sections {
            for line in &section.lines {
                wtr.write_record([
                    month.clone(),
                    section.category.to_string(),
                    line.subcategory.clone(),
                    line.budgeted.to_string(),
                    line.spent.to_string(),
                    line.remaining.to_string(),
                ])
                .map_err(io_err)?;
            }
        }

        wtr.write_record([
            month,
            "TOTAL".to_string(),
            String::new(),
            self.total_budget.to_string(),
            self.total_spent.to_string(),
            self.total_diff.to_string(),
        ])
        .map_err(io_err)?;

        wtr.flush()?;
        Ok(())
    }

    /// Look up a category's section
    pub fn section(&self, category: &Category) -> Option<&CategorySection> {
        self.sections.iter().find(|s| &s.category == category)
    }
}

fn build_section(category: Category, budget: &MonthBudget, actual: &CategoryPlan) -> CategorySection {
    // union of budgeted and ledger subcategories, alphabetical
    let mut names: BTreeSet<&str> = BTreeSet::new();
    if let Some(subs) = budget.subcategories(&category) {
        names.extend(subs.keys().map(String::as_str));
    }
    if let Some(subs) = actual.subcategories(&category) {
        names.extend(subs.keys().map(String::as_str));
    }

    let lines: Vec<ViewLine> = names
        .into_iter()
        .map(|sub| {
            let budgeted = budget.get(&category, sub).unwrap_or_default();
            let spent = actual.get(&category, sub).unwrap_or_default();
            ViewLine {
                subcategory: sub.to_string(),
                budgeted,
                spent,
                remaining: budgeted - spent,
            }
        })
        .collect();

    let budgeted = budget.category_total(&category);
    let spent = actual.category_total(&category);

    CategorySection {
        category,
        lines,
        budgeted,
        spent,
        remaining: budgeted - spent,
    }
}
