//! tally - monthly category budgets reconciled against a CSV ledger
//!
//! This library provides the core of the tally budgeting tool: recurring
//! presets that seed each new month's budget, the month budget store, and a
//! reconciliation engine that compares a month's plan with the transactions
//! recorded in a CSV ledger.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (amounts, months, categories, plans, transactions)
//! - `storage`: JSON document storage and the CSV ledger loader
//! - `services`: Preset, budget and reconciliation logic
//! - `reports`: Month drill-down and trends reports
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::config::{Settings, TallyPaths};
//! use tally::services::ReconciliationService;
//! use tally::storage::Storage;
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths, &settings)?;
//! storage.load_all()?;
//!
//! let summary = ReconciliationService::new(&storage).summarize("2025-03".parse()?)?;
//! println!("{} spent of {}", summary.spent_total, summary.budget_total);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
