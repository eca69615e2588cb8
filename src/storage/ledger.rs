//! Transaction ledger loader
//!
//! The ledger is a CSV file with a header row and the columns `Date`,
//! `Category`, `Subcategory`, `Amount` and an optional `Description`. It is
//! read-only here and re-read on every request. A row with a bad date or amount
//! aborts the whole load; an unrecognised category name is kept as is.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Money, Transaction};

/// Date format of the `Date` column
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Category", "Subcategory", "Amount"];

/// One row as it appears in the file, before validation
#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Subcategory")]
    subcategory: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description", default)]
    description: Option<String>,
}

impl LedgerRow {
    fn into_transaction(self, line: u64) -> TallyResult<Transaction> {
        let date = NaiveDate::parse_from_str(self.date.trim(), LEDGER_DATE_FORMAT).map_err(|e| {
            TallyError::malformed_record(line, format!("bad date '{}': {}", self.date, e))
        })?;

        let amount = Money::parse(&self.amount)
            .map_err(|e| TallyError::malformed_record(line, format!("bad amount: {}", e)))?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Transaction {
            date,
            category: Category::from_name(&self.category),
            subcategory: self.subcategory.trim().to_string(),
            amount,
            description,
        })
    }
}

/// Reads transactions from the ledger CSV
#[derive(Debug, Clone)]
pub struct TransactionLedger {
    path: PathBuf,
}

impl TransactionLedger {
    /// Create a ledger reader for a CSV path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing CSV
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load every transaction, in file order
    ///
    /// A ledger file that does not exist yet loads as empty.
    pub fn load(&self) -> TallyResult<Vec<Transaction>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No ledger file, treating as empty");
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            TallyError::Io(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let transactions = parse_ledger(file)?;
        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "Loaded ledger"
        );
        Ok(transactions)
    }
}

/// Parse ledger CSV data from any reader
pub fn parse_ledger<R: Read>(reader: R) -> TallyResult<Vec<Transaction>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| TallyError::malformed_record(1, format!("unreadable header: {}", e)))?
        .clone();
    let headers = trim_headers(&headers);

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TallyError::malformed_record(
                1,
                format!("missing required column '{}'", column),
            ));
        }
    }

    let mut transactions = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let row: LedgerRow = record
            .deserialize(Some(&headers))
            .map_err(|e| TallyError::malformed_record(line, e.to_string()))?;

        transactions.push(row.into_transaction(line)?);
    }

    Ok(transactions)
}

fn trim_headers(headers: &StringRecord) -> StringRecord {
    headers.iter().map(str::trim).collect()
}
