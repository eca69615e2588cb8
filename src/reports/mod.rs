//! Reports module for tally
//!
//! Provides the budget-versus-actual drill-down for a single month and the
//! per-category spending trends across the ledger.

pub mod month_view;
pub mod trends;

pub use month_view::{CategorySection, MonthViewReport, ViewLine};
pub use trends::TrendsReport;
