//! Reconciliation summary display formatting
//!
//! Formats month summaries for terminal output in table and detail views.

use crate::services::{BudgetStatus, ReconciliationSummary};

use super::report::{format_signed, separator};

/// Format the month list as a table
pub fn format_summary_list(summaries: &[ReconciliationSummary]) -> String {
    if summaries.is_empty() {
        return "No budgeted months.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:>12}  {:>12}  {:>12}  {:>12}  {}\n",
        "Month", "Budget", "Spent", "Earnings", "Diff", "Status"
    ));
    output.push_str(&format!(
        "{:-<8}  {:->12}  {:->12}  {:->12}  {:->12}  {:-<6}\n",
        "", "", "", "", "", ""
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<8}  {:>12}  {:>12}  {:>12}  {:>12}  {}\n",
            summary.month.to_string(),
            summary.budget_total,
            summary.spent_total,
            summary.earnings_total,
            format_signed(summary.diff),
            status_label(summary.status),
        ));
    }

    output
}

/// Format a single month's summary with the per-category breakdown
pub fn format_summary_details(summary: &ReconciliationSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Month: {}\n", summary.month));
    output.push_str(&format!("  Budget:       {:>12}\n", summary.budget_total));
    output.push_str(&format!("  Spent:        {:>12}\n", summary.spent_total));
    output.push_str(&format!("  Earnings:     {:>12}\n", summary.earnings_total));
    output.push_str(&format!("  Diff:         {:>12}\n", format_signed(summary.diff)));
    output.push_str(&format!("  Status:       {}\n", status_label(summary.status)));
    output.push_str(&format!("  Transactions: {}\n", summary.transaction_count));

    if summary.transaction_count == 0 {
        return output;
    }

    output.push_str(&format!("\nSpent by category\n{}\n", separator(40)));
    for (category, subs) in summary.spent.iter() {
        output.push_str(&format!(
            "{:<26} {:>12}\n",
            category.as_str(),
            summary.spent.category_total(category)
        ));
        for (sub, amount) in subs {
            output.push_str(&format!("  {:<24} {:>12}\n", sub, amount));
        }
    }

    output
}

fn status_label(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Over => "OVER",
        BudgetStatus::Under => "under",
    }
}
