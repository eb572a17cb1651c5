//! Recurring template repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{RecurringId, RecurringTransaction};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecurringData {
    recurring: Vec<RecurringTransaction>,
}

/// Repository for recurring transaction templates
pub struct RecurringRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecurringId, RecurringTransaction>>,
}

impl RecurringRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: RecurringData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for rec in file_data.recurring {
            data.insert(rec.id, rec);
        }

        log::debug!("Loaded {} recurring templates", data.len());
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let recurring = self.get_all()?;
        write_json_atomic(&self.path, &RecurringData { recurring })
    }

    /// All templates ordered by next due date
    pub fn get_all(&self) -> Result<Vec<RecurringTransaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut recurring: Vec<_> = data.values().cloned().collect();
        recurring.sort_by(|a, b| {
            a.next_due
                .cmp(&b.next_due)
                .then_with(|| a.merchant.cmp(&b.merchant))
        });
        Ok(recurring)
    }

    /// Find a template by full id or displayed short form
    pub fn find(&self, identifier: &str) -> Result<Option<RecurringTransaction>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        if let Ok(id) = identifier.parse::<RecurringId>() {
            return Ok(data.get(&id).cloned());
        }

        let mut matches = data.values().filter(|r| r.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(rec), None) => Ok(Some(rec.clone())),
            (Some(_), Some(_)) => Err(TallyError::Validation(format!(
                "Recurring id '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    pub fn upsert(&self, rec: RecurringTransaction) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(rec.id, rec);
        Ok(())
    }

    pub fn delete(&self, id: RecurringId) -> Result<Option<RecurringTransaction>, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Frequency, Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn template(merchant: &str, day: u32) -> RecurringTransaction {
        RecurringTransaction::new(
            merchant,
            Money::from_dollars(10),
            TransactionType::Expense,
            Category::Entertainment,
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_ordered_by_due_date() {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecurringRepository::new(temp_dir.path().join("recurring.json"));

        repo.upsert(template("Spotify", 20)).unwrap();
        repo.upsert(template("Netflix", 5)).unwrap();

        let merchants: Vec<_> = repo.get_all().unwrap().into_iter().map(|r| r.merchant).collect();
        assert_eq!(merchants, vec!["Netflix", "Spotify"]);
    }

    #[test]
    fn test_find_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecurringRepository::new(temp_dir.path().join("recurring.json"));
        let rec = template("Gym", 1);
        let id = rec.id;
        repo.upsert(rec).unwrap();

        assert!(repo.find(&id.to_string()).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.find(&id.to_string()).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recurring.json");
        let repo = RecurringRepository::new(path.clone());
        let rec = template("Rent", 1);
        let id = rec.id;
        repo.upsert(rec).unwrap();
        repo.save().unwrap();

        let repo2 = RecurringRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.find(&id.to_string()).unwrap().unwrap().merchant, "Rent");
    }
}
