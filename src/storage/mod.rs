//! Storage layer for tally
//!
//! Provides JSON document storage for presets and month budgets, the CSV
//! ledger reader, and the audit trail for every persisted mutation.
//!
//! Each document is read, modified in memory and written back whole. There is
//! no cross-process locking: two processes editing the same document at once
//! can lose an update (last writer wins).

pub mod budget;
pub mod file_io;
pub mod init;
pub mod ledger;
pub mod presets;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use ledger::{parse_ledger, TransactionLedger};
pub use presets::PresetRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::error::TallyError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TallyPaths,
    pub presets: PresetRepository,
    pub budgets: BudgetRepository,
    pub ledger: TransactionLedger,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TallyPaths, settings: &Settings) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            presets: PresetRepository::new(paths.presets_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            ledger: TransactionLedger::new(settings.ledger_path(&paths)),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: settings.audit_enabled,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load presets and budgets from disk
    ///
    /// The ledger is not cached; it is read on each reconciliation.
    pub fn load_all(&mut self) -> Result<(), TallyError> {
        self.presets.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Record a creation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity))
    }

    /// Record an update in the audit log, with a generated diff summary
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        before: &T,
        after: &T,
    ) -> Result<(), TallyError> {
        if !self.audit_enabled {
            return Ok(());
        }
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit
            .log(&AuditEntry::update(entity_type, entity_id, before, after, diff))
    }

    /// Record a deletion in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_storage(settings: &Settings) -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, settings).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage(&Settings::default());

        assert!(temp_dir.path().join("data").exists());
        // loading initialises the preset document only
        assert!(storage.paths().presets_file().exists());
        assert!(!storage.paths().budgets_file().exists());
    }

    #[test]
    fn test_ledger_path_follows_settings() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            ledger_file: Some(temp_dir.path().join("bank.csv")),
            ..Settings::default()
        };
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &settings).unwrap();

        assert_eq!(storage.ledger.path(), &temp_dir.path().join("bank.csv"));
    }

    #[test]
    fn test_log_update_records_diff() {
        let (_temp_dir, storage) = create_storage(&Settings::default());

        storage
            .log_update(
                EntityType::MonthBudget,
                "2025-03",
                &json!({"Home": {"Rent": 900}}),
                &json!({"Home": {"Rent": 950}}),
            )
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].diff_summary.as_deref(), Some("Home.Rent: 900 -> 950"));
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let settings = Settings {
            audit_enabled: false,
            ..Settings::default()
        };
        let (_temp_dir, storage) = create_storage(&settings);

        storage
            .log_create(EntityType::Preset, "Home/Rent", &json!(900))
            .unwrap();

        assert!(!storage.audit().exists());
    }
}
