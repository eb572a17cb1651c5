//! Export module for Tally
//!
//! - CSV: transactions, spreadsheet-compatible
//! - JSON: full snapshot of transactions, budgets, income plan and
//!   recurring templates

pub mod csv;
pub mod json;

pub use csv::{export_transactions_csv, write_transactions_csv, TRANSACTION_HEADER};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
