//! Append-only JSONL audit logger

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{TallyError, TallyResult};

use super::entry::AuditEntry;

fn io_err(action: &str, e: std::io::Error) -> TallyError {
    TallyError::Io(format!("Failed to {} audit log: {}", action, e))
}

/// Appends entries to `audit.log` and reads them back
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry; each call opens, writes one line and flushes
    pub fn log(&self, entry: &AuditEntry) -> TallyResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| TallyError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| io_err("open", e))?;
        writeln!(file, "{}", line).map_err(|e| io_err("write", e))?;
        file.flush().map_err(|e| io_err("flush", e))
    }

    /// Every entry, oldest first. A missing log is an empty history.
    pub fn read_all(&self) -> TallyResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.log_path).map_err(|e| io_err("read", e))?;
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    TallyError::Json(format!("Bad audit entry at line {}: {}", i + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> TallyResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Entries for one record, oldest first
    pub fn read_for(&self, entity_id: &str) -> TallyResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.concerns(entity_id))
            .collect())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(n: usize) -> AuditEntry {
        AuditEntry::create(
            EntityType::Transaction,
            format!("txn-{}", n),
            Some(format!("Merchant {}", n)),
            &json!({"n": n}),
        )
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_id, "txn-1");
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 0..5 {
            logger.log(&entry(i)).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "txn-3");
        assert_eq!(recent[1].entity_id, "txn-4");

        assert_eq!(logger.read_recent(10).unwrap().len(), 5);
    }

    #[test]
    fn test_read_for() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();
        logger.log(&entry(2)).unwrap();
        logger
            .log(&AuditEntry::delete(EntityType::Transaction, "txn-1", None, &json!({})))
            .unwrap();

        let history = logger.read_for("txn-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].operation, Operation::Delete);
    }

    #[test]
    fn test_corrupt_line_is_an_error() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(logger.path()).unwrap();
        writeln!(file, "not json").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_one_line_per_entry() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();
        logger.log(&entry(2)).unwrap();

        let contents = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
