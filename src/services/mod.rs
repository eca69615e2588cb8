//! Service layer for tally
//!
//! The service layer provides the budgeting rules on top of the storage
//! layer: preset management, the month budget lifecycle, form parsing and
//! reconciliation against the ledger.

pub mod budget;
pub mod form;
pub mod preset;
pub mod reconciliation;

pub use budget::BudgetService;
pub use form::{parse_budget_form, split_field_key, BudgetForm, SkipReason, SkippedField};
pub use preset::PresetService;
pub use reconciliation::{BudgetStatus, ReconciliationService, ReconciliationSummary};
