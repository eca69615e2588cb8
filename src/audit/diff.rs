//! Diff generation for audit logging
//!
//! Produces a one-line summary of what changed between two JSON documents,
//! descending into nested objects so budget edits read as
//! `Shopping.Kids: 50 -> 75`.

use serde_json::Value;

/// Summarise the changes between two JSON values, or `None` if equal
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = collect_changes(before, after, "");
    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, prefix: &str) -> Vec<String> {
    let mut changes = Vec::new();

    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let path = join_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => {
                        changes.extend(collect_changes(before_val, after_val, &path));
                    }
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", path, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        _ if before != after => {
            let label = if prefix.is_empty() {
                String::new()
            } else {
                format!("{}: ", prefix)
            };
            changes.push(format!(
                "{}{} -> {}",
                label,
                format_value(before),
                format_value(after)
            ));
        }
        _ => {}
    }

    changes
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_amount_change() {
        let before = json!({"Shopping": {"Kids": 50, "Toys": 10}, "Home": {}});
        let after = json!({"Shopping": {"Kids": 75, "Toys": 10}, "Home": {}});

        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("Shopping.Kids: 50 -> 75")
        );
    }

    #[test]
    fn test_added_and_removed_lines() {
        let before = json!({"Home": {"Rent": 900}});
        let after = json!({"Home": {"Water": 30}, "Earnings": {}});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("Home.Rent: 900 -> (removed)"));
        assert!(diff.contains("Home.Water: (added) -> 30"));
        assert!(diff.contains("Earnings: (added) -> {0 fields}"));
    }

    #[test]
    fn test_no_changes() {
        let doc = json!({"Utilities": {"Power": 100}});
        assert!(generate_diff(&doc, &doc).is_none());
    }

    #[test]
    fn test_scalar_change() {
        assert_eq!(generate_diff(&json!(100), &json!(120)).as_deref(), Some("100 -> 120"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(12.5)), "12.5");
        assert_eq!(format_value(&json!("Kids")), "\"Kids\"");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert!(format_value(&json!("a".repeat(80))).ends_with("...\""));
    }
}
