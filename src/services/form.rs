//! Budget edit form parsing
//!
//! A form-style editor submits one field per budget line, keyed
//! `"<Category>__<Subcategory>"`. Bad fields are skipped one at a time and
//! the rest of the form is still applied.

use std::fmt;

use tracing::warn;

use crate::error::TallyError;
use crate::models::{parse_non_negative, Category, Money, MonthBudget};

/// Separator between category and subcategory in a field key
pub const FIELD_SEPARATOR: &str = "__";

/// Why a form field was left out of the budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Key lacks the separator, repeats it, or has an empty side
    MalformedKey,
    /// Category part is not one of the fixed categories
    UnknownCategory,
    /// Value is not a non-negative number
    InvalidAmount(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedKey => write!(f, "expected Category{}Subcategory", FIELD_SEPARATOR),
            SkipReason::UnknownCategory => write!(f, "unknown category"),
            SkipReason::InvalidAmount(reason) => write!(f, "{}", reason),
        }
    }
}

/// A field that was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub key: String,
    pub value: String,
    pub reason: SkipReason,
}

/// The outcome of parsing a submitted form
#[derive(Debug, Clone, Default)]
pub struct BudgetForm {
    /// The full replacement budget (always holds all four categories)
    pub budget: MonthBudget,
    /// Fields that were ignored, in submission order
    pub skipped: Vec<SkippedField>,
}

/// Split a field key on its one and only separator
///
/// Returns `None` when the separator is missing or occurs more than once.
pub fn split_field_key(key: &str) -> Option<(&str, &str)> {
    if key.matches(FIELD_SEPARATOR).count() != 1 {
        return None;
    }
    key.split_once(FIELD_SEPARATOR)
}

/// Build a replacement month budget from submitted form fields
///
/// Blank values mean "no line" and are dropped without being reported.
pub fn parse_budget_form<I, K, V>(fields: I) -> BudgetForm
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut form = BudgetForm {
        budget: MonthBudget::with_all_categories(),
        skipped: Vec::new(),
    };

    for (key, value) in fields {
        let (key, value) = (key.as_ref(), value.as_ref());
        match parse_field(key, value) {
            Ok(Some((category, subcategory, amount))) => {
                form.budget.set(category, subcategory, amount);
            }
            Ok(None) => {}
            Err(reason) => {
                warn!(key, value, %reason, "Skipping budget field");
                form.skipped.push(SkippedField {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason,
                });
            }
        }
    }

    form
}

fn parse_field<'k>(
    key: &'k str,
    value: &str,
) -> Result<Option<(Category, &'k str, Money)>, SkipReason> {
    let (category, subcategory) = split_field_key(key).ok_or(SkipReason::MalformedKey)?;
    let subcategory = subcategory.trim();
    if category.trim().is_empty() || subcategory.is_empty() {
        return Err(SkipReason::MalformedKey);
    }

    let category: Category = category.parse().map_err(|_| SkipReason::UnknownCategory)?;

    if value.trim().is_empty() {
        return Ok(None);
    }

    let amount = parse_non_negative(value).map_err(|e| match e {
        TallyError::InvalidAmount { reason, .. } => SkipReason::InvalidAmount(reason),
        other => SkipReason::InvalidAmount(other.to_string()),
    })?;

    Ok(Some((category, subcategory, amount)))
}
