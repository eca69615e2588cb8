//! Audit history display formatting

use crate::audit::AuditEntry;

/// Format audit entries, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use serde_json::json;

    #[test]
    fn test_format_history() {
        let entries = vec![
            AuditEntry::create(EntityType::Preset, "Home/Rent", &json!(900)),
            AuditEntry::delete(EntityType::Preset, "Home/Rent", &json!(900)),
        ];

        let output = format_history(&entries);
        assert_eq!(output.lines().filter(|l| l.starts_with('[')).count(), 2);
        assert!(output.contains("Home/Rent"));
    }

    #[test]
    fn test_format_empty_history() {
        assert_eq!(format_history(&[]), "No history recorded.");
    }
}
