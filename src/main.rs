use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{
    handle_budget_command, handle_export_command, handle_goal_command, handle_recurring_command,
    handle_report_command, handle_scan_command, handle_transaction_command, handle_voice_command,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::storage::{initialize_storage, needs_initialization, Storage};

/// Environment variable holding the log filter; falls back to RUST_LOG
const LOG_ENV: &str = "TALLY_LOG";

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Receipt and voice capture with monthly category budgets",
    long_about = "Tally turns receipt OCR text and spoken phrases into transactions, \
                  tracks them against monthly category budgets and tells you how the \
                  month is going."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse receipt OCR text from a file or stdin
    Scan(tally::cli::ScanArgs),

    /// Parse a spoken phrase such as "25 bucks on lunch"
    Voice(tally::cli::VoiceArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(tally::cli::TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(tally::cli::BudgetCommands),

    /// Recurring transaction commands
    #[command(subcommand)]
    Recurring(tally::cli::RecurringCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(tally::cli::GoalCommands),

    /// Reports
    #[command(subcommand)]
    Report(tally::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(tally::cli::ExportCommands),

    /// Initialize the data directory with a default budget
    Init {
        /// Standing monthly income for the new budget
        #[arg(long)]
        income: Option<String>,
    },

    /// Show current configuration and paths, optionally changing settings
    Config {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,

        /// Date format (strftime pattern)
        #[arg(long)]
        date_format: Option<String>,

        /// Days ahead `recurring upcoming` looks by default
        #[arg(long)]
        upcoming_days: Option<u32>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only changes to this record (e.g. "txn-1a2b3c4d" or "income")
        #[arg(long)]
        id: Option<String>,
    },
}

fn init_logging() {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    env_logger::Builder::new()
        .parse_filters(&filter)
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Tally - receipt and voice capture with monthly budgets");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally init' to set up your budget.");
            return Ok(());
        }
    };

    match command {
        Commands::Init { income } => run_init(&paths, settings, income)?,
        Commands::Config {
            currency,
            date_format,
            upcoming_days,
        } => run_config(&paths, settings, currency, date_format, upcoming_days)?,
        other => run_with_storage(paths, &settings, other)?,
    }

    Ok(())
}

fn run_init(paths: &TallyPaths, mut settings: Settings, income: Option<String>) -> Result<()> {
    if let Some(income) = income {
        settings.monthly_income = tally::cli::parse_amount(&income)?;
    }

    println!("Initializing Tally at: {}", paths.base_dir().display());
    if initialize_storage(paths, &settings)? {
        println!("Initialization complete!");
        println!();
        println!("A budget line was created for every category.");
        println!("Run 'tally budget list' to see the limits.");
    } else {
        println!("Already initialized; nothing changed.");
    }
    Ok(())
}

fn run_config(
    paths: &TallyPaths,
    mut settings: Settings,
    currency: Option<String>,
    date_format: Option<String>,
    upcoming_days: Option<u32>,
) -> Result<()> {
    let changed = currency.is_some() || date_format.is_some() || upcoming_days.is_some();
    if let Some(currency) = currency {
        settings.currency_symbol = currency;
    }
    if let Some(date_format) = date_format {
        settings.date_format = date_format;
    }
    if let Some(days) = upcoming_days {
        settings.upcoming_days = days;
    }
    if changed {
        settings.save(paths)?;
    }

    println!("Tally Configuration");
    println!("===================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Monthly income:  {}", settings.format_money(settings.monthly_income));
    println!("  Upcoming days:   {}", settings.upcoming_days);
    Ok(())
}

fn run_with_storage(paths: TallyPaths, settings: &Settings, command: Commands) -> Result<()> {
    if needs_initialization(&paths) {
        log::info!("First run; initializing {}", paths.base_dir().display());
        initialize_storage(&paths, settings)?;
    }

    let storage = Storage::new(paths)?;
    storage.load_all()?;

    match command {
        Commands::Scan(args) => handle_scan_command(&storage, settings, args)?,
        Commands::Voice(args) => handle_voice_command(&storage, settings, args)?,
        Commands::Txn(cmd) => handle_transaction_command(&storage, settings, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&storage, settings, cmd)?,
        Commands::Recurring(cmd) => handle_recurring_command(&storage, settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&storage, settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::History { limit, id } => {
            let mut entries = match id.as_deref() {
                Some(id) => storage.audit().read_for(id)?,
                None => storage.audit().read_recent(limit)?,
            };
            let start = entries.len().saturating_sub(limit);
            entries.drain(..start);
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Init { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}
