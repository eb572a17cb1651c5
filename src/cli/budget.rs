//! Budget CLI commands
//!
//! Monthly overview, limit and income edits, and spending advice.

use clap::Subcommand;

use super::{parse_amount, parse_month};
use crate::config::settings::Settings;
use crate::display::{format_budget_lines, format_budget_overview, format_insight};
use crate::error::TallyResult;
use crate::services::{BudgetService, SpendingInsight};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show spending against budget for a month
    Overview {
        /// Month (e.g., "2025-01", "January", "current", "last")
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budget categories with their limits and overrides
    List,

    /// Set a category's limit
    Set {
        /// Category name
        category: String,
        /// Amount (e.g., "600" or "600.00")
        amount: String,
        /// Only override this month instead of changing the standing limit
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Remove a category's override for a month
    Clear {
        /// Category name
        category: String,
        /// Month whose override to remove
        #[arg(short, long)]
        month: String,
    },

    /// Set planned monthly income
    Income {
        /// Amount
        amount: String,
        /// Only override this month instead of changing the standing income
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Hide a category from totals
    Hide {
        /// Category name
        category: String,
    },

    /// Show a hidden category again
    Show {
        /// Category name
        category: String,
    },

    /// Add a custom budget category
    AddCategory {
        /// Category name
        name: String,
        /// Monthly limit
        amount: String,
    },

    /// One line of advice about this month's spending
    Insight {
        /// Month (e.g., "2025-01", "January", "current", "last")
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TallyResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Overview { month } => {
            let month = parse_month(month.as_deref())?;
            let overview = service.overview(month)?;
            print!("{}", format_budget_overview(&overview, settings));
        }

        BudgetCommands::List => {
            let budgets = storage.budgets.get_all()?;
            print!("{}", format_budget_lines(&budgets, settings));
        }

        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let limit = parse_amount(&amount)?;
            let month = month.as_deref().map(|m| parse_month(Some(m))).transpose()?;
            let budget = service.set_limit(&category, limit, month)?;

            match month {
                Some(m) => println!(
                    "Set {} limit for {} to {}",
                    budget.name,
                    m.friendly(),
                    settings.format_money(limit)
                ),
                None => println!("Set {} limit to {}", budget.name, settings.format_money(limit)),
            }
        }

        BudgetCommands::Clear { category, month } => {
            let month = parse_month(Some(&month))?;
            let budget = service.clear_override(&category, month)?;
            println!(
                "Cleared {} override for {}; limit is {}",
                budget.name,
                month.friendly(),
                settings.format_money(budget.limit_for(month))
            );
        }

        BudgetCommands::Income { amount, month } => {
            let amount = parse_amount(&amount)?;
            let month = month.as_deref().map(|m| parse_month(Some(m))).transpose()?;
            service.set_income(amount, month)?;

            match month {
                Some(m) => println!("Set income for {} to {}", m.friendly(), settings.format_money(amount)),
                None => println!("Set monthly income to {}", settings.format_money(amount)),
            }
        }

        BudgetCommands::Hide { category } => {
            let budget = service.set_hidden(&category, true)?;
            println!("Hid {}", budget.name);
        }

        BudgetCommands::Show { category } => {
            let budget = service.set_hidden(&category, false)?;
            println!("Showing {}", budget.name);
        }

        BudgetCommands::AddCategory { name, amount } => {
            let budget = service.add_category(&name, parse_amount(&amount)?)?;
            println!(
                "Added category {} with limit {}",
                budget.name,
                settings.format_money(budget.limit)
            );
        }

        BudgetCommands::Insight { month } => {
            let month = parse_month(month.as_deref())?;
            let overview = service.overview(month)?;
            println!("{}", format_insight(&SpendingInsight::from_overview(&overview)));
        }
    }

    Ok(())
}
