//! Recurring preset repository for JSON storage
//!
//! Holds the preset document (`recurring.json`) in memory and writes it back
//! whole on save.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TallyError;
use crate::models::{Category, Money, PresetSet};

use super::file_io::{read_json, write_json_atomic};

/// Repository for preset persistence
pub struct PresetRepository {
    path: PathBuf,
    presets: RwLock<PresetSet>,
}

impl PresetRepository {
    /// Create a new preset repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            presets: RwLock::new(PresetSet::with_all_categories()),
        }
    }

    /// Load presets from disk
    ///
    /// A missing document is initialised with the four empty categories and
    /// written out immediately.
    pub fn load(&self) -> Result<(), TallyError> {
        let loaded: Option<PresetSet> = read_json(&self.path)?;

        let mut presets = self
            .presets
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match loaded {
            Some(data) => {
                debug!(path = %self.path.display(), lines = data.line_count(), "Loaded presets");
                *presets = data;
            }
            None => {
                debug!(path = %self.path.display(), "Initialising preset document");
                *presets = PresetSet::with_all_categories();
                write_json_atomic(&self.path, &*presets)?;
            }
        }

        Ok(())
    }

    /// Save presets to disk
    pub fn save(&self) -> Result<(), TallyError> {
        let presets = self
            .presets
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*presets)
    }

    /// Get a copy of the current presets
    pub fn get_all(&self) -> Result<PresetSet, TallyError> {
        let presets = self
            .presets
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(presets.clone())
    }

    /// Insert or overwrite a preset line
    pub fn upsert(
        &self,
        category: Category,
        subcategory: &str,
        amount: Money,
    ) -> Result<(), TallyError> {
        let mut presets = self
            .presets
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        presets.set(category, subcategory, amount);
        Ok(())
    }

    /// Delete a preset line; returns true if it existed
    pub fn delete(&self, category: &Category, subcategory: &str) -> Result<bool, TallyError> {
        let mut presets = self
            .presets
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(presets.remove(category, subcategory))
    }

    /// Path of the backing document
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
