//! Core data models for tally
//!
//! This module contains the data structures of the budgeting domain: amounts,
//! months, categories, category plans (presets and month budgets), and ledger
//! transactions.

pub mod category;
pub mod money;
pub mod month;
pub mod plan;
pub mod transaction;

pub use category::Category;
pub use money::{parse_non_negative, Money, MoneyParseError};
pub use month::Month;
pub use plan::{display_categories, CategoryPlan, MonthBudget, PresetSet, SubcategoryAmounts};
pub use transaction::Transaction;
