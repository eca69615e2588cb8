//! Display formatting for terminal output
//!
//! Provides utilities for formatting plans, month summaries and audit
//! history for terminal display.

pub mod history;
pub mod plan;
pub mod report;
pub mod summary;

pub use history::format_history;
pub use plan::format_plan;
pub use summary::{format_summary_details, format_summary_list};
