//! Preset CLI commands
//!
//! Implements CLI commands for managing the recurring presets that seed new
//! month budgets.

use clap::Subcommand;

use crate::display::format_plan;
use crate::error::TallyResult;
use crate::models::Category;
use crate::services::PresetService;
use crate::storage::Storage;

/// Preset subcommands
#[derive(Subcommand)]
pub enum PresetCommands {
    /// List all recurring presets
    List,

    /// Add or overwrite a preset line
    Add {
        /// Category (Shopping, Utilities, Home or Earnings)
        category: Category,
        /// Subcategory name
        subcategory: String,
        /// Amount (e.g., "100" or "12.50")
        amount: String,
    },

    /// Remove a preset line
    #[command(alias = "rm")]
    Remove {
        /// Category name
        category: String,
        /// Subcategory name
        subcategory: String,
    },
}

/// Handle a preset command
pub fn handle_preset_command(storage: &Storage, cmd: PresetCommands) -> TallyResult<()> {
    let service = PresetService::new(storage);

    match cmd {
        PresetCommands::List => {
            let presets = service.list()?;
            print!("{}", format_plan("Recurring Presets", &presets));
        }

        PresetCommands::Add {
            category,
            subcategory,
            amount,
        } => {
            let presets = service.add(category.clone(), &subcategory, &amount)?;
            let saved = presets
                .get(&category, subcategory.trim())
                .unwrap_or_default();
            println!("Saved preset {}/{}: {}", category, subcategory.trim(), saved);
        }

        PresetCommands::Remove {
            category,
            subcategory,
        } => {
            let removed = service.remove(Category::from_name(&category), &subcategory)?;

            if removed {
                println!("Removed preset {}/{}", category, subcategory);
            } else {
                println!("No preset {}/{}; nothing removed", category, subcategory);
            }
        }
    }

    Ok(())
}
