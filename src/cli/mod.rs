//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod preset;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use preset::{handle_preset_command, PresetCommands};
pub use report::{handle_report_command, ReportCommands};
