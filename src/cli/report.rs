//! Report CLI commands
//!
//! Implements CLI commands for reconciliation summaries and reports.

use clap::Subcommand;

use crate::display::{format_summary_details, format_summary_list};
use crate::error::TallyResult;
use crate::models::Month;
use crate::reports::{MonthViewReport, TrendsReport};
use crate::services::ReconciliationService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Budget, spent, earnings and variance for one month
    Summary {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<Month>,
    },

    /// Summary of every budgeted month
    Months,

    /// Budget versus actual per subcategory for one month
    View {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<Month>,
        /// Write CSV to stdout instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Per-category spending over every ledger month
    Trends {
        /// Write CSV to stdout instead of a table
        #[arg(long)]
        csv: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> TallyResult<()> {
    match cmd {
        ReportCommands::Summary { month } => {
            let month = month.unwrap_or_else(Month::current);
            let summary = ReconciliationService::new(storage).summarize(month)?;
            print!("{}", format_summary_details(&summary));
        }

        ReportCommands::Months => {
            let summaries = ReconciliationService::new(storage).summarize_all()?;
            println!("{}", format_summary_list(&summaries).trim_end());
        }

        ReportCommands::View { month, csv } => {
            let month = month.unwrap_or_else(Month::current);
            let report = MonthViewReport::generate(storage, month)?;
            if csv {
                report.export_csv(&mut std::io::stdout().lock())?;
            } else {
                print!("{}", report.format_terminal());
            }
        }

        ReportCommands::Trends { csv } => {
            let report = TrendsReport::generate(storage)?;
            if csv {
                report.export_csv(&mut std::io::stdout().lock())?;
            } else {
                print!("{}", report.format_terminal());
            }
        }
    }

    Ok(())
}
