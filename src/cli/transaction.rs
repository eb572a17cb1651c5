//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_category, parse_date, parse_month};
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{TallyError, TallyResult};
use crate::models::{Category, EntrySource, TransactionType};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Merchant or description
        merchant: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name (default: Other, or Salary with --income)
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only this month (e.g., "2025-01", "January", "last")
        #[arg(short, long)]
        month: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one transaction
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            merchant,
            amount,
            category,
            date,
            income,
            note,
        } => {
            let kind = if income {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            let category = match category {
                Some(c) => parse_category(&c)?,
                None if income => Category::Salary,
                None => Category::Other,
            };

            let txn = service.create(CreateTransactionInput {
                merchant,
                date: parse_date(date.as_deref())?,
                amount: parse_amount(&amount)?,
                kind,
                category,
                note,
                source: EntrySource::Manual,
            })?;

            println!("Recorded transaction {}", txn.id);
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::List {
            month,
            category,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(m) = month {
                filter = filter.month(parse_month(Some(&m))?);
            }
            if let Some(c) = category {
                filter = filter.category(parse_category(&c)?);
            }

            let transactions = service.list(filter)?;
            print!("{}", format_transaction_register(&transactions, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id)?;
            println!("Deleted transaction {} ({} {})", txn.id, txn.merchant, settings.format_money(txn.amount));
        }
    }

    Ok(())
}
