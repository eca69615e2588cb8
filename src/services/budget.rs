//! Month budget service
//!
//! Provides the month budget lifecycle: seeding a new month from the presets,
//! back-filling missing categories, wholesale replacement and listing.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::TallyResult;
use crate::models::{Month, MonthBudget};
use crate::services::form::{parse_budget_form, BudgetForm};
use crate::storage::Storage;

/// Service for month budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// A month's budget, or an empty plan if the month was never budgeted
    ///
    /// Never creates anything.
    pub fn get_budget(&self, month: Month) -> TallyResult<MonthBudget> {
        Ok(self.storage.budgets.get(month)?.unwrap_or_default())
    }

    /// A month's budget, creating it from the presets if needed
    ///
    /// A new month gets a copy of the presets as they are right now; later
    /// preset edits do not reach it. Missing categories are back-filled on
    /// every call, so older budgets gain categories added since.
    pub fn ensure_month_budget(&self, month: Month) -> TallyResult<MonthBudget> {
        let existing = self.storage.budgets.get(month)?;
        let created = existing.is_none();

        let mut budget = match existing {
            Some(budget) => budget,
            None => self.storage.presets.get_all()?,
        };
        let before = budget.clone();
        let backfilled = budget.backfill_categories();

        if !created && !backfilled {
            debug!(%month, "Month budget already complete");
            return Ok(budget);
        }

        self.storage.budgets.upsert(month, budget.clone())?;
        self.storage.budgets.save()?;

        if created {
            self.storage
                .log_create(EntityType::MonthBudget, month.to_string(), &budget)?;
            info!(%month, lines = budget.line_count(), "Created month budget from presets");
        } else {
            self.storage
                .log_update(EntityType::MonthBudget, month.to_string(), &before, &budget)?;
            info!(%month, "Back-filled missing categories");
        }

        Ok(budget)
    }

    /// Replace a month's budget wholesale
    ///
    /// Categories and subcategories absent from `budget` are dropped, not
    /// merged with what was stored before.
    pub fn set_budget(&self, month: Month, budget: MonthBudget) -> TallyResult<()> {
        let previous = self.storage.budgets.upsert(month, budget.clone())?;
        self.storage.budgets.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::MonthBudget,
                month.to_string(),
                &before,
                &budget,
            )?,
            None => self
                .storage
                .log_create(EntityType::MonthBudget, month.to_string(), &budget)?,
        }

        info!(%month, lines = budget.line_count(), "Replaced month budget");
        Ok(())
    }

    /// Apply a submitted edit form as the month's new budget
    ///
    /// Malformed fields are skipped and reported back; the rest is saved.
    pub fn apply_form<I, K, V>(&self, month: Month, fields: I) -> TallyResult<BudgetForm>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let form = parse_budget_form(fields);
        self.set_budget(month, form.budget.clone())?;
        Ok(form)
    }

    /// Every budgeted month, ascending
    pub fn list_months(&self) -> TallyResult<Vec<Month>> {
        self.storage.budgets.months()
    }
}
