//! Core data models for Tally
//!
//! This module contains the data structures of the budgeting domain:
//! transactions, categories, category budgets, recurring templates, savings
//! goals and the parser candidates that feed them.

pub mod budget;
pub mod candidate;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::{BudgetValidationError, CategoryBudget, IncomePlan, LimitOverride, MonthlyIncome};
pub use candidate::{CandidateSource, ParsedCandidate};
pub use category::{Category, CategoryParseError};
pub use goal::{FinancialGoal, GoalValidationError};
pub use ids::{GoalId, RecurringId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{BudgetMonth, PeriodParseError};
pub use recurring::{Frequency, RecurringTransaction, RecurringValidationError};
pub use transaction::{EntrySource, Transaction, TransactionType, TransactionValidationError};
