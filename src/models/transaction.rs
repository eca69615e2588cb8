//! Ledger transactions
//!
//! Transactions are read-only records loaded from the ledger CSV. The month a
//! transaction belongs to is derived from its date and never stored.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Category, Money, Month};

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Date of the transaction
    pub date: NaiveDate,

    /// Budget category
    pub category: Category,

    /// Free-form subcategory within the category
    pub subcategory: String,

    /// Amount as recorded; expenses and earnings are both positive
    pub amount: Money,

    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new transaction with no description
    pub fn new(
        date: NaiveDate,
        category: Category,
        subcategory: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            category,
            subcategory: subcategory.into(),
            amount,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The month this transaction falls in
    pub fn month(&self) -> Month {
        Month::from_date(self.date)
    }

    /// Whether this is an income entry
    pub fn is_earnings(&self) -> bool {
        self.category.is_earnings()
    }
}
