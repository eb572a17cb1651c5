//! Recurring transaction service
//!
//! Manages recurring templates and materialises the ones that have come due.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Frequency, Money, RecurringTransaction, Transaction, TransactionType};
use crate::storage::Storage;

/// Input for creating a recurring template
#[derive(Debug, Clone)]
pub struct CreateRecurringInput {
    pub merchant: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: Category,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub note: Option<String>,
}

/// Service for recurring templates
pub struct RecurringService<'a> {
    storage: &'a Storage,
}

impl<'a> RecurringService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a template
    pub fn add(&self, input: CreateRecurringInput) -> TallyResult<RecurringTransaction> {
        let mut rec = RecurringTransaction::new(
            input.merchant.trim(),
            input.amount,
            input.kind,
            input.category,
            input.frequency,
            input.start_date,
        );
        if let Some(note) = input.note {
            rec.note = note;
        }

        rec.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.recurring.upsert(rec.clone())?;
        self.storage.recurring.save()?;

        self.storage.log_create(
            EntityType::Recurring,
            rec.id.to_string(),
            Some(rec.merchant.clone()),
            &rec,
        )?;

        Ok(rec)
    }

    /// All templates ordered by next due date
    pub fn list(&self) -> TallyResult<Vec<RecurringTransaction>> {
        self.storage.recurring.get_all()
    }

    /// Find a template by full or short id
    pub fn find(&self, identifier: &str) -> TallyResult<RecurringTransaction> {
        self.storage
            .recurring
            .find(identifier)?
            .ok_or_else(|| TallyError::recurring_not_found(identifier))
    }

    /// Stop or restart generation for a template
    pub fn set_active(&self, identifier: &str, active: bool) -> TallyResult<RecurringTransaction> {
        let mut rec = self.find(identifier)?;
        let before = rec.clone();

        if active {
            rec.resume();
        } else {
            rec.pause();
        }

        self.storage.recurring.upsert(rec.clone())?;
        self.storage.recurring.save()?;

        self.storage.log_update(
            EntityType::Recurring,
            rec.id.to_string(),
            Some(rec.merchant.clone()),
            &before,
            &rec,
        )?;

        Ok(rec)
    }

    /// Remove a template; transactions it already generated stay
    pub fn delete(&self, identifier: &str) -> TallyResult<RecurringTransaction> {
        let rec = self.find(identifier)?;

        self.storage.recurring.delete(rec.id)?;
        self.storage.recurring.save()?;

        self.storage.log_delete(
            EntityType::Recurring,
            rec.id.to_string(),
            Some(rec.merchant.clone()),
            &rec,
        )?;

        Ok(rec)
    }

    /// Generate one transaction per due template and advance each once
    ///
    /// Templates that are several periods behind catch up one period per
    /// call.
    pub fn process_due(&self, today: NaiveDate) -> TallyResult<Vec<Transaction>> {
        let due: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|r| r.is_due(today))
            .collect();

        if due.is_empty() {
            return Ok(Vec::new());
        }

        // Build and validate every occurrence before touching storage
        let mut batch = Vec::with_capacity(due.len());
        for mut rec in due {
            let before = rec.clone();
            let txn = rec.generate();
            txn.validate().map_err(|e| {
                TallyError::Validation(format!("{} ({}): {}", rec.merchant, rec.id, e))
            })?;

            rec.last_generated = Some(rec.next_due);
            rec.advance();
            batch.push((before, rec, txn));
        }

        for (_, rec, txn) in &batch {
            self.storage.transactions.upsert(txn.clone())?;
            self.storage.recurring.upsert(rec.clone())?;
        }
        self.storage.transactions.save()?;
        self.storage.recurring.save()?;

        let mut generated = Vec::with_capacity(batch.len());
        for (before, rec, txn) in batch {
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(format!("{} {}", txn.date, txn.merchant)),
                &txn,
            )?;
            self.storage.log_update(
                EntityType::Recurring,
                rec.id.to_string(),
                Some(rec.merchant.clone()),
                &before,
                &rec,
            )?;

            log::info!("Generated {} for {} due {}", txn.amount, rec.merchant, txn.date);
            generated.push(txn);
        }

        Ok(generated)
    }

    /// Active templates due within `days` of `today`, soonest first
    ///
    /// Overdue templates are included.
    pub fn upcoming(&self, today: NaiveDate, days: u32) -> TallyResult<Vec<RecurringTransaction>> {
        let mut upcoming: Vec<_> = self
            .list()?
            .into_iter()
            .filter(|r| r.active && r.days_until_due(today) <= i64::from(days))
            .collect();
        upcoming.sort_by(|a, b| a.next_due.cmp(&b.next_due));
        Ok(upcoming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::EntrySource;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rent(start: NaiveDate) -> CreateRecurringInput {
        CreateRecurringInput {
            merchant: "Landlord".into(),
            amount: Money::from_dollars(1500),
            kind: TransactionType::Expense,
            category: Category::Bills,
            frequency: Frequency::Monthly,
            start_date: start,
            note: None,
        }
    }

    #[test]
    fn test_add_and_list() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);

        let rec = service.add(rent(date(2025, 1, 1))).unwrap();
        assert_eq!(rec.next_due, date(2025, 1, 1));
        assert_eq!(service.list().unwrap().len(), 1);
        assert_eq!(service.find(&rec.id.to_string()).unwrap().id, rec.id);
    }

    #[test]
    fn test_add_rejects_zero_amount() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);

        let err = service
            .add(CreateRecurringInput {
                amount: Money::zero(),
                ..rent(date(2025, 1, 1))
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_process_due() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);
        let rec = service.add(rent(date(2025, 1, 31))).unwrap();

        // Not due yet
        assert!(service.process_due(date(2025, 1, 30)).unwrap().is_empty());

        let generated = service.process_due(date(2025, 2, 10)).unwrap();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].date, date(2025, 1, 31));
        assert_eq!(generated[0].amount, Money::from_dollars(-1500));
        assert_eq!(generated[0].source, EntrySource::Recurring);

        let updated = service.find(&rec.id.to_string()).unwrap();
        assert_eq!(updated.last_generated, Some(date(2025, 1, 31)));
        assert_eq!(updated.next_due, date(2025, 2, 28));

        assert_eq!(storage.transactions.count().unwrap(), 1);

        // Already advanced past today
        assert!(service.process_due(date(2025, 2, 10)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_template_generates_nothing() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);
        service.add(rent(date(2025, 1, 1))).unwrap();

        // Written around the service, so it never went through validation
        let broken = RecurringTransaction::new(
            "  ",
            Money::from_dollars(10),
            TransactionType::Expense,
            Category::Other,
            Frequency::Monthly,
            date(2025, 1, 1),
        );
        storage.recurring.upsert(broken).unwrap();
        let audit_before = storage.audit().read_all().unwrap().len();

        let err = service.process_due(date(2025, 1, 15)).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.audit().read_all().unwrap().len(), audit_before);
        assert!(service
            .list()
            .unwrap()
            .iter()
            .all(|r| r.last_generated.is_none()));
    }

    #[test]
    fn test_process_due_audits_after_saving() {
        let (temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);
        service.add(rent(date(2025, 1, 1))).unwrap();

        service.process_due(date(2025, 1, 2)).unwrap();

        let entries = storage.audit().read_all().unwrap();
        let created = entries
            .iter()
            .find(|e| e.entity_type == EntityType::Transaction)
            .unwrap();

        // Every audited transaction is on disk
        let paths = TallyPaths::with_base_dir(temp.path().to_path_buf());
        let reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert!(reloaded.transactions.find(&created.entity_id).unwrap().is_some());
    }

    #[test]
    fn test_paused_templates_skip() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);
        let rec = service.add(rent(date(2025, 1, 1))).unwrap();

        service.set_active(&rec.id.to_string(), false).unwrap();
        assert!(service.process_due(date(2025, 3, 1)).unwrap().is_empty());
        assert!(service.upcoming(date(2025, 1, 1), 7).unwrap().is_empty());

        service.set_active(&rec.id.to_string(), true).unwrap();
        assert_eq!(service.process_due(date(2025, 3, 1)).unwrap().len(), 1);
    }

    #[test]
    fn test_upcoming() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);

        service.add(rent(date(2025, 1, 20))).unwrap();
        service
            .add(CreateRecurringInput {
                merchant: "Netflix".into(),
                amount: Money::from_cents(1549),
                category: Category::Entertainment,
                ..rent(date(2025, 1, 12))
            })
            .unwrap();

        let upcoming = service.upcoming(date(2025, 1, 10), 7).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].merchant, "Netflix");

        let later = service.upcoming(date(2025, 1, 10), 14).unwrap();
        assert_eq!(later.len(), 2);
        assert_eq!(later[0].merchant, "Netflix");
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = RecurringService::new(&storage);
        let rec = service.add(rent(date(2025, 1, 1))).unwrap();

        service.delete(&rec.id.to_string()).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.find(&rec.id.to_string()).unwrap_err().is_not_found());
    }
}
