//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod goal;
pub mod recurring;
pub mod report;
pub mod scan;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};
pub use scan::{handle_scan_command, handle_voice_command, ScanArgs, VoiceArgs};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{TallyError, TallyResult};
use crate::models::{BudgetMonth, Category, Money};

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub fn parse_date(value: Option<&str>) -> TallyResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            TallyError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
        }),
        None => Ok(today()),
    }
}

/// Parse a month ("2025-01", "January", "last"...), defaulting to the current one
pub fn parse_month(value: Option<&str>) -> TallyResult<BudgetMonth> {
    match value {
        Some(s) => BudgetMonth::parse_relative(s, today())
            .map_err(|e| TallyError::Validation(e.to_string())),
        None => Ok(BudgetMonth::from_date(today())),
    }
}

/// Parse an amount such as "12.50" or "$1,200"
pub fn parse_amount(value: &str) -> TallyResult<Money> {
    Money::parse(value).map_err(|e| TallyError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a category name
pub fn parse_category(value: &str) -> TallyResult<Category> {
    value
        .parse()
        .map_err(|e: crate::models::CategoryParseError| TallyError::Validation(e.to_string()))
}
