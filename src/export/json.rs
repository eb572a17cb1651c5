//! JSON Export functionality
//!
//! Exports everything Tally stores as one JSON document with a schema
//! version.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryBudget, FinancialGoal, IncomePlan, RecurringTransaction, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,
    pub budgets: Vec<CategoryBudget>,
    pub income: IncomePlan,
    pub recurring: Vec<RecurringTransaction>,

    #[serde(default)]
    pub goals: Vec<FinancialGoal>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub recurring_count: usize,

    #[serde(default)]
    pub goal_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> TallyResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let income = storage.budgets.income()?;
        let recurring = storage.recurring.get_all()?;
        let goals = storage.goals.get_all()?;

        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());

        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            recurring_count: recurring.len(),
            goal_count: goals.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets,
            income,
            recurring,
            goals,
            metadata,
        })
    }

    /// Check the schema version matches this build
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transactions but the export holds {}",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }
        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> TallyResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export
pub fn import_from_json(json_str: &str) -> TallyResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)
        .map_err(|e| TallyError::Export(format!("Invalid export file: {}", e)))?;
    export.validate().map_err(TallyError::Export)?;
    Ok(export)
}
