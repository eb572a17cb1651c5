//! Recurring transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_category, parse_date, today};
use crate::config::settings::Settings;
use crate::display::{format_recurring_list, format_transaction_register};
use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Frequency, TransactionType};
use crate::services::{CreateRecurringInput, RecurringService};
use crate::storage::Storage;

/// Recurring subcommands
#[derive(Subcommand, Debug)]
pub enum RecurringCommands {
    /// Create a recurring transaction
    Add {
        /// Merchant or description
        merchant: String,
        /// Amount per occurrence
        amount: String,
        /// daily, weekly, biweekly, monthly, quarterly or yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// First due date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        start: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Note copied onto generated transactions
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List recurring transactions
    List,

    /// Generate transactions for everything due
    Process {
        /// Treat this date as today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show what comes due soon
    Upcoming {
        /// Days ahead to look (default from settings)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Stop generating a recurring transaction
    Pause {
        /// Recurring ID (full or short form)
        id: String,
    },

    /// Resume a paused recurring transaction
    Resume {
        /// Recurring ID (full or short form)
        id: String,
    },

    /// Delete a recurring transaction
    Delete {
        /// Recurring ID (full or short form)
        id: String,
    },
}

/// Handle a recurring command
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    cmd: RecurringCommands,
) -> TallyResult<()> {
    let service = RecurringService::new(storage);

    match cmd {
        RecurringCommands::Add {
            merchant,
            amount,
            frequency,
            category,
            start,
            income,
            note,
        } => {
            let frequency: Frequency = frequency.parse().map_err(TallyError::Validation)?;
            let kind = if income {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            let category = match category {
                Some(c) => parse_category(&c)?,
                None if income => Category::Salary,
                None => Category::Bills,
            };

            let rec = service.add(CreateRecurringInput {
                merchant,
                amount: parse_amount(&amount)?,
                kind,
                category,
                frequency,
                start_date: parse_date(start.as_deref())?,
                note,
            })?;

            println!(
                "Created recurring {} {} {} (first due {})",
                rec.id,
                rec.merchant,
                rec.frequency,
                settings.format_date(rec.next_due)
            );
        }

        RecurringCommands::List => {
            let templates = service.list()?;
            print!("{}", format_recurring_list(&templates, today(), settings));
        }

        RecurringCommands::Process { date } => {
            let today = parse_date(date.as_deref())?;
            let generated = service.process_due(today)?;

            if generated.is_empty() {
                println!("Nothing due.");
            } else {
                println!("Generated {} transaction(s):\n", generated.len());
                print!("{}", format_transaction_register(&generated, settings));
            }
        }

        RecurringCommands::Upcoming { days } => {
            let days = days.unwrap_or(settings.upcoming_days);
            let today = today();
            let upcoming = service.upcoming(today, days)?;

            println!("Due in the next {} days:\n", days);
            print!("{}", format_recurring_list(&upcoming, today, settings));
        }

        RecurringCommands::Pause { id } => {
            let rec = service.set_active(&id, false)?;
            println!("Paused {} {}", rec.id, rec.merchant);
        }

        RecurringCommands::Resume { id } => {
            let rec = service.set_active(&id, true)?;
            println!("Resumed {} {}", rec.id, rec.merchant);
        }

        RecurringCommands::Delete { id } => {
            let rec = service.delete(&id)?;
            println!("Deleted recurring {} {}", rec.id, rec.merchant);
        }
    }

    Ok(())
}
