use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tally::cli::{handle_budget_command, handle_preset_command, handle_report_command};
use tally::config::{Settings, TallyPaths};
use tally::display::format_history;
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Monthly category budgets reconciled against a CSV ledger",
    long_about = "tally keeps a budget per month for the Shopping, Utilities, Home and \
                  Earnings categories. New months are seeded from recurring presets, \
                  and every month can be compared with the transactions in a CSV ledger."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recurring preset commands
    #[command(subcommand)]
    Preset(tally::cli::PresetCommands),

    /// Month budget commands
    #[command(subcommand)]
    Budget(tally::cli::BudgetCommands),

    /// Reconciliation summaries and reports
    #[command(subcommand)]
    Report(tally::cli::ReportCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    // Initialize paths and settings
    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone(), &settings)?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Preset(cmd)) => handle_preset_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, cmd)?,
        Some(Commands::History { count }) => {
            let entries = storage.audit().read_recent(count)?;
            println!("{}", format_history(&entries));
        }
        Some(Commands::Init) => {
            println!("Initializing tally at: {}", paths.base_dir().display());
            tally::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Presets:     {}", paths.presets_file().display());
            println!("Budgets:     {}", paths.budgets_file().display());
            println!("Ledger:      {}", settings.ledger_path(&paths).display());
            println!();
            println!("Run 'tally preset add <category> <subcategory> <amount>' to add a preset.");
        }
        Some(Commands::Config) => {
            println!("tally Configuration");
            println!("===================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Presets:         {}", storage.presets.path().display());
            println!("Budgets:         {}", storage.budgets.path().display());
            println!("Ledger:          {}", storage.ledger.path().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Schema version: {}", settings.schema_version);
            println!("  Audit enabled:  {}", settings.audit_enabled);
        }
        None => {
            println!("tally - monthly budgets against a CSV ledger");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
