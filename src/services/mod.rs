//! Service layer for Tally
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging and derived figures such as budget
//! roll-ups and spending advice.

pub mod budget;
pub mod goal;
pub mod insight;
pub mod recurring;
pub mod transaction;

pub use budget::{aggregate_budget, BudgetAggregator, BudgetOverview, BudgetService, CategorySummary};
pub use goal::{CreateGoalInput, GoalService, UpdateGoalInput};
pub use insight::{InsightLevel, SpendingInsight};
pub use recurring::{CreateRecurringInput, RecurringService};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
