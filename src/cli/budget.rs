//! Budget CLI commands
//!
//! Implements CLI commands for month budgets: viewing, seeding from presets,
//! form-style edits and wholesale replacement from a JSON file.

use std::path::PathBuf;

use clap::Subcommand;
use tracing::warn;

use crate::display::format_plan;
use crate::error::{TallyError, TallyResult};
use crate::models::{Month, MonthBudget};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show a month's budget without creating it
    Show {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<Month>,
    },

    /// Show a month's budget, creating it from the presets if needed
    Ensure {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<Month>,
    },

    /// Replace a month's budget with the given lines
    ///
    /// Each field is Category__Subcategory=amount. Bad fields are skipped and
    /// reported; every line not given is dropped.
    Set {
        /// Month as YYYY-MM
        month: Month,
        /// Fields such as Shopping__Kids=50
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Replace a month's budget with a JSON document
    Replace {
        /// Month as YYYY-MM
        month: Month,
        /// JSON file of the form {"Category": {"Subcategory": amount}}
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List budgeted months
    Months,
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> TallyResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Show { month } => {
            let month = month.unwrap_or_else(Month::current);
            let budget = service.get_budget(month)?;
            if budget.is_empty() {
                println!("No budget for {}.", month);
                println!("Run 'tally budget ensure {}' to create it from presets.", month);
            } else {
                print!("{}", format_plan(&format!("Budget: {}", month), &budget));
            }
        }

        BudgetCommands::Ensure { month } => {
            let month = month.unwrap_or_else(Month::current);
            let budget = service.ensure_month_budget(month)?;
            print!("{}", format_plan(&format!("Budget: {}", month), &budget));
        }

        BudgetCommands::Set { month, fields } => {
            let pairs: Vec<(String, String)> = fields
                .iter()
                .filter_map(|field| match field.split_once('=') {
                    Some((key, value)) => Some((key.trim().to_string(), value.to_string())),
                    None => {
                        warn!(field = field.as_str(), "Ignoring field without '='");
                        println!("Skipped '{}': expected KEY=VALUE", field);
                        None
                    }
                })
                .collect();

            let form = service.apply_form(month, pairs)?;
            for skipped in &form.skipped {
                println!(
                    "Skipped '{}={}': {}",
                    skipped.key, skipped.value, skipped.reason
                );
            }
            println!(
                "Saved budget for {} ({} lines, total {})",
                month,
                form.budget.line_count(),
                form.budget.total()
            );
        }

        BudgetCommands::Replace { month, file } => {
            let contents = std::fs::read_to_string(&file).map_err(|e| {
                TallyError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let budget: MonthBudget = serde_json::from_str(&contents)?;

            if let Some((category, sub, amount)) = budget.lines().find(|(_, _, a)| a.is_negative())
            {
                return Err(TallyError::invalid_amount(
                    amount.to_string(),
                    format!("{}/{} must not be negative", category, sub),
                ));
            }

            let lines = budget.line_count();
            service.set_budget(month, budget)?;
            println!("Replaced budget for {} ({} lines)", month, lines);
        }

        BudgetCommands::Months => {
            let months = service.list_months()?;
            if months.is_empty() {
                println!("No budgeted months.");
            }
            for month in months {
                println!("{}", month);
            }
        }
    }

    Ok(())
}
