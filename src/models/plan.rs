//! Category plans: category → subcategory → amount
//!
//! The same shape backs both the recurring preset document and each month's
//! budget. Cloning a plan is a full structural copy, so a month seeded from the
//! presets shares nothing with them afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Category, Money};

/// Subcategory name → amount
pub type SubcategoryAmounts = BTreeMap<String, Money>;

/// A category → subcategory → amount mapping
///
/// Serialized as a JSON object keyed by category name. Categories may be
/// absent; [`CategoryPlan::backfill_categories`] restores the full set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPlan(BTreeMap<Category, SubcategoryAmounts>);

/// The recurring presets used to seed new months
pub type PresetSet = CategoryPlan;

/// The plan for one month
pub type MonthBudget = CategoryPlan;

impl CategoryPlan {
    /// An empty plan with no categories at all
    pub fn new() -> Self {
        Self::default()
    }

    /// A plan holding every built-in category, each with no subcategories
    pub fn with_all_categories() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, BTreeMap::new())).collect())
    }

    /// Insert any missing built-in categories as empty; returns true if anything was added
    pub fn backfill_categories(&mut self) -> bool {
        let mut changed = false;
        for category in Category::ALL {
            if !self.0.contains_key(&category) {
                self.0.insert(category, BTreeMap::new());
                changed = true;
            }
        }
        changed
    }

    /// Whether all four built-in categories are present
    pub fn has_all_categories(&self) -> bool {
        Category::ALL.iter().all(|c| self.0.contains_key(c))
    }

    /// Set an amount, creating the category if needed
    pub fn set(&mut self, category: Category, subcategory: impl Into<String>, amount: Money) {
        self.0
            .entry(category)
            .or_default()
            .insert(subcategory.into(), amount);
    }

    /// Add to an amount, starting from zero if the line is new
    pub fn add(&mut self, category: &Category, subcategory: &str, amount: Money) {
        let subs = self.0.entry(category.clone()).or_default();
        match subs.get_mut(subcategory) {
            Some(existing) => *existing += amount,
            None => {
                subs.insert(subcategory.to_string(), amount);
            }
        }
    }

    /// Remove a subcategory; returns true if it was present
    pub fn remove(&mut self, category: &Category, subcategory: &str) -> bool {
        self.0
            .get_mut(category)
            .map(|subs| subs.remove(subcategory).is_some())
            .unwrap_or(false)
    }

    pub fn get(&self, category: &Category, subcategory: &str) -> Option<Money> {
        self.0.get(category).and_then(|subs| subs.get(subcategory).copied())
    }

    /// Subcategories of a category, if the category is present
    pub fn subcategories(&self, category: &Category) -> Option<&SubcategoryAmounts> {
        self.0.get(category)
    }

    pub fn contains_category(&self, category: &Category) -> bool {
        self.0.contains_key(category)
    }

    /// Categories present in the plan, in category order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.0.keys()
    }

    /// Iterate categories present in the plan, in category order
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &SubcategoryAmounts)> {
        self.0.iter()
    }

    /// Iterate every (category, subcategory, amount) line
    pub fn lines(&self) -> impl Iterator<Item = (&Category, &str, Money)> + '_ {
        self.0.iter().flat_map(|(category, subs)| {
            subs.iter()
                .map(move |(sub, amount)| (category, sub.as_str(), *amount))
        })
    }

    /// Sum of every amount across all categories
    pub fn total(&self) -> Money {
        self.lines().map(|(_, _, amount)| amount).sum()
    }

    /// Sum of one category's amounts (zero if absent)
    pub fn category_total(&self, category: &Category) -> Money {
        self.0
            .get(category)
            .map(|subs| subs.values().sum())
            .unwrap_or_default()
    }

    /// Number of subcategory lines
    pub fn line_count(&self) -> usize {
        self.0.values().map(|subs| subs.len()).sum()
    }

    /// True when no categories are present at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The built-in categories plus any others present in `plans`, in display order
pub fn display_categories<'a>(plans: impl IntoIterator<Item = &'a CategoryPlan>) -> Vec<Category> {
    let mut categories: BTreeSet<Category> = Category::ALL.into_iter().collect();
    for plan in plans {
        categories.extend(plan.categories().cloned());
    }
    categories.into_iter().collect()
}

impl FromIterator<(Category, SubcategoryAmounts)> for CategoryPlan {
    fn from_iter<I: IntoIterator<Item = (Category, SubcategoryAmounts)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
