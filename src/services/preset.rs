//! Recurring preset service
//!
//! Presets are the category/subcategory/amount lines copied into every month
//! budget the first time that month is referenced. Each mutation rewrites the
//! whole preset document.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{parse_non_negative, Category, PresetSet};
use crate::storage::Storage;

/// Service for recurring preset management
pub struct PresetService<'a> {
    storage: &'a Storage,
}

impl<'a> PresetService<'a> {
    /// Create a new preset service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current presets
    pub fn list(&self) -> TallyResult<PresetSet> {
        self.storage.presets.get_all()
    }

    /// Insert or overwrite a preset line
    ///
    /// The amount must parse as a non-negative decimal; anything else is
    /// rejected with `InvalidAmount` and nothing is written.
    pub fn add(&self, category: Category, subcategory: &str, amount: &str) -> TallyResult<PresetSet> {
        let subcategory = subcategory.trim();
        if subcategory.is_empty() {
            return Err(TallyError::Validation(
                "Subcategory name cannot be empty".into(),
            ));
        }

        let amount = parse_non_negative(amount)?;
        let before = self.storage.presets.get_all()?.get(&category, subcategory);

        self.storage.presets.upsert(category.clone(), subcategory, amount)?;
        self.storage.presets.save()?;

        let entity_id = preset_id(&category, subcategory);
        match before {
            Some(previous) => {
                self.storage
                    .log_update(EntityType::Preset, entity_id, &previous, &amount)?
            }
            None => self
                .storage
                .log_create(EntityType::Preset, entity_id, &amount)?,
        }

        info!(%category, subcategory, %amount, "Preset saved");
        self.list()
    }

    /// Remove a preset line
    ///
    /// Removing a line that does not exist is a no-op and writes nothing.
    /// Returns whether a line was removed.
    pub fn remove(&self, category: Category, subcategory: &str) -> TallyResult<bool> {
        let subcategory = subcategory.trim();
        let before = self.storage.presets.get_all()?.get(&category, subcategory);

        let Some(previous) = before else {
            debug!(%category, subcategory, "No such preset, nothing to remove");
            return Ok(false);
        };

        self.storage.presets.delete(&category, subcategory)?;
        self.storage.presets.save()?;
        self.storage.log_delete(
            EntityType::Preset,
            preset_id(&category, subcategory),
            &previous,
        )?;

        info!(%category, subcategory, "Preset removed");
        Ok(true)
    }
}

fn preset_id(category: &Category, subcategory: &str) -> String {
    format!("{}/{}", category, subcategory)
}
