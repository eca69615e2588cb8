//! Audit logging system for tally
//!
//! Records every preset and month-budget mutation with before/after values in
//! an append-only, line-delimited JSON log.
//!
//! - `AuditEntry`: one logged operation (timestamp, operation, entity, values).
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: one-line summary of the change between two documents.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
