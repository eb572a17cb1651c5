//! Tally - receipt and voice capture with monthly category budgets
//!
//! This library turns loosely structured text into transactions and rolls
//! those transactions up against per-category monthly budgets.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `parse`: receipt OCR and voice phrase parsers
//! - `models`: core data models (transactions, categories, budgets, etc.)
//! - `services`: business logic, including the budget aggregator
//! - `storage`: JSON file storage layer
//! - `audit`: audit logging system
//! - `config`: configuration and path management
//! - `reports`, `export`, `display`: read-only views of stored data
//! - `cli`: command handlers for the `tally` binary
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust
//! use tally::models::{BudgetMonth, Category, CategoryBudget, IncomePlan, Money, Transaction};
//!
//! let candidate = tally::parse_voice("I spent 15 dollars at Starbucks").unwrap();
//! assert_eq!(candidate.amount, Money::from_dollars(15));
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let txns = vec![Transaction::from_candidate(&candidate, date)];
//! let budgets = vec![CategoryBudget::for_category(Category::Other, 0)];
//! let month = BudgetMonth::from_date(date);
//!
//! let overview = tally::aggregate_budget(&txns, &budgets, &IncomePlan::default(), month);
//! assert_eq!(overview.total_spent, Money::from_dollars(15));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod parse;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
pub use parse::{parse_receipt, parse_voice, ParseError};
pub use services::aggregate_budget;
