//! Month budget repository for JSON storage
//!
//! Manages loading and saving the budget document (`budgets.json`), a JSON
//! object keyed by "YYYY-MM".

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TallyError;
use crate::models::{Month, MonthBudget};

use super::file_io::{read_json, write_json_atomic};

/// Repository for month budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BTreeMap<Month, MonthBudget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load budgets from disk (a missing document loads as empty)
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: BTreeMap<Month, MonthBudget> = read_json(&self.path)?.unwrap_or_default();

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        debug!(path = %self.path.display(), months = file_data.len(), "Loaded budgets");
        *budgets = file_data;
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), TallyError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*budgets)
    }

    /// Get a copy of a month's budget
    pub fn get(&self, month: Month) -> Result<Option<MonthBudget>, TallyError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&month).cloned())
    }

    /// Insert or replace a month's budget; returns the previous value
    pub fn upsert(
        &self,
        month: Month,
        budget: MonthBudget,
    ) -> Result<Option<MonthBudget>, TallyError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.insert(month, budget))
    }

    /// Months present in the store, ascending
    pub fn months(&self) -> Result<Vec<Month>, TallyError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.keys().copied().collect())
    }

    /// Path of the backing document
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
