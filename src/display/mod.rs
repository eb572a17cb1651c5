//! Display formatting for terminal output
//!
//! Plain-text tables for transactions, budgets, recurring templates and goals.

pub mod budget;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::{format_budget_lines, format_budget_overview, format_recurring_list};
pub use goal::format_goal_list;
pub use report::{fit, format_bar, format_insight, format_percentage, separator, truncate};
pub use transaction::{
    format_candidate, format_transaction_details, format_transaction_register, format_transaction_row,
};
