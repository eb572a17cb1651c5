//! Audit trail for Tally
//!
//! Every create, update and delete of a transaction, budget line, income
//! figure or recurring template is appended to `audit.log` as one JSON
//! object per line (JSONL), with before/after snapshots.
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.to_string(),
//!     Some(txn.merchant.clone()),
//!     &txn,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::summarize_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
