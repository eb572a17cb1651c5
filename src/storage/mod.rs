//! Storage layer for Tally
//!
//! JSON file repositories with atomic writes, plus the audit logger that
//! records every mutation.

pub mod budgets;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod recurring;
pub mod transactions;

pub use budgets::{BudgetData, BudgetRepository};
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::{default_budget, initialize_storage, needs_initialization};
pub use recurring::RecurringRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{summarize_changes, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TallyPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub recurring: RecurringRepository,
    pub goals: GoalRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a Storage rooted at `paths`; nothing is read until `load_all`
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            recurring: RecurringRepository::new(paths.recurring_file()),
            goals: GoalRepository::new(paths.goals_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), TallyError> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.recurring.load()?;
        self.goals.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TallyError> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.recurring.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a newly created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a modification in the audit log
    ///
    /// The change summary is derived from the two snapshots.
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), TallyError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => summarize_changes(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a removal in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), TallyError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
