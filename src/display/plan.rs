//! Category plan display formatting
//!
//! Formats presets and month budgets as an indented category tree.

use crate::models::{display_categories, CategoryPlan};

/// Format a plan as a category tree with per-category subtotals
///
/// Built-in categories are always listed; a category missing from the plan is
/// shown the same as an empty one.
pub fn format_plan(title: &str, plan: &CategoryPlan) -> String {
    let name_width = plan
        .lines()
        .map(|(_, sub, _)| sub.chars().count())
        .max()
        .unwrap_or(0)
        .max(20);

    let mut output = String::new();
    output.push_str(&format!("{}\n", title));

    for category in display_categories([plan]) {
        let subs = plan.subcategories(&category);
        let count = subs.map(|s| s.len()).unwrap_or(0);

        output.push_str(&format!(
            "\n{:<width$}  {:>12}\n",
            category.as_str(),
            plan.category_total(&category),
            width = name_width + 2,
        ));

        match subs {
            Some(subs) if count > 0 => {
                for (sub, amount) in subs {
                    output.push_str(&format!(
                        "  {:<name_width$}  {:>12}\n",
                        sub,
                        amount,
                        name_width = name_width,
                    ));
                }
            }
            _ => output.push_str("  (none)\n"),
        }
    }

    output.push_str(&format!(
        "\n{:<width$}  {:>12}\n",
        "TOTAL",
        plan.total(),
        width = name_width + 2,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    #[test]
    fn test_format_plan() {
        let mut plan = CategoryPlan::with_all_categories();
        plan.set(Category::Utilities, "Power", Money::from_units(100));
        plan.set(Category::Utilities, "Water", Money::from_cents(2550));

        let output = format_plan("Presets", &plan);
        assert!(output.starts_with("Presets\n"));
        assert!(output.contains("Power"));
        assert!(output.contains("125.50"));
        assert!(output.contains("(none)"));
    }

    #[test]
    fn test_unrecognised_category_is_listed() {
        let mut plan = CategoryPlan::with_all_categories();
        plan.set(Category::from_name("Travel"), "Flights", Money::from_units(300));

        let output = format_plan("2024-01", &plan);
        assert!(output.contains("Travel"));
        assert!(output.contains("Flights"));
    }

    #[test]
    fn test_missing_categories_still_listed() {
        let mut plan = CategoryPlan::new();
        plan.set(Category::Shopping, "Kids", Money::from_units(50));

        let output = format_plan("2024-01", &plan);
        for category in Category::ALL {
            assert!(output.contains(category.as_str()));
        }
    }
}
