//! Storage initialization
//!
//! Handles first-run setup of the data directory and documents.

use std::collections::BTreeMap;

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{Month, MonthBudget, PresetSet};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directories, a preset document with the four empty categories
/// and an empty budget document. Existing documents are left untouched.
pub fn initialize_storage(paths: &TallyPaths) -> Result<(), TallyError> {
    paths.ensure_directories()?;

    if !paths.presets_file().exists() {
        write_json_atomic(paths.presets_file(), &PresetSet::with_all_categories())?;
    }

    if !paths.budgets_file().exists() {
        write_json_atomic(paths.budgets_file(), &BTreeMap::<Month, MonthBudget>::new())?;
    }

    Ok(())
}
