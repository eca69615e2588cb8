//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the report and summary views.

use crate::models::Money;

/// Format a money amount with an explicit sign for non-zero values
pub fn format_signed(amount: Money) -> String {
    if amount.is_positive() {
        format!("+{}", amount)
    } else {
        amount.to_string()
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
