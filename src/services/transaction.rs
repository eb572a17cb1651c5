//! Transaction service
//!
//! Adds, lists and deletes transactions, and turns confirmed parser
//! candidates into stored expenses.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{
    BudgetMonth, Category, EntrySource, Money, ParsedCandidate, Transaction, TransactionType,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Filter by income or expense
    pub kind: Option<TransactionType>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Restrict to one calendar month
    pub fn month(self, month: BudgetMonth) -> Self {
        self.date_range(month.start_date(), month.end_date())
    }

    /// Filter by income or expense
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub merchant: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: TransactionType,
    pub category: Category,
    pub note: Option<String>,
    pub source: EntrySource,
}

impl CreateTransactionInput {
    /// A manual expense with no note
    pub fn expense(merchant: impl Into<String>, date: NaiveDate, amount: Money, category: Category) -> Self {
        Self {
            merchant: merchant.into(),
            date,
            amount,
            kind: TransactionType::Expense,
            category,
            note: None,
            source: EntrySource::Manual,
        }
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TallyResult<Transaction> {
        let mut txn = Transaction::new(
            input.merchant.trim(),
            input.date,
            input.amount,
            input.kind,
            input.category,
        )
        .with_source(input.source);

        if let Some(note) = input.note {
            txn.note = note;
        }

        self.insert(txn)
    }

    /// Store a confirmed parser candidate as an expense dated `date`
    pub fn save_candidate(&self, candidate: &ParsedCandidate, date: NaiveDate) -> TallyResult<Transaction> {
        self.insert(Transaction::from_candidate(candidate, date))
    }

    /// Validate, store and audit a fully-built transaction
    pub fn insert(&self, txn: Transaction) -> TallyResult<Transaction> {
        txn.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} {}", txn.date, txn.merchant)),
            &txn,
        )?;

        log::info!("Recorded {} {} at {}", txn.kind, txn.amount.abs(), txn.merchant);
        Ok(txn)
    }

    /// Find a transaction by full or short id
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    /// List transactions, newest first, with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> TallyResult<Vec<Transaction>> {
        let mut transactions = if let Some(category) = filter.category {
            self.storage.transactions.get_by_category(category)?
        } else if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
            self.storage.transactions.get_by_date_range(start, end)?
        } else {
            self.storage.transactions.get_all()?
        };

        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Delete a transaction
    pub fn delete(&self, identifier: &str) -> TallyResult<Transaction> {
        let txn = self
            .find(identifier)?
            .ok_or_else(|| TallyError::transaction_not_found(identifier))?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} {}", txn.date, txn.merchant)),
            &txn,
        )?;

        Ok(txn)
    }

    /// Count all transactions
    pub fn count(&self) -> TallyResult<usize> {
        self.storage.transactions.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::CandidateSource;
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

    #[test]
    fn test_create_transaction() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(CreateTransactionInput::expense(
                "  Starbucks ",
                date(2025, 1, 15),
                Money::from_cents(545),
                Category::FoodAndDrink,
            ))
            .unwrap();

        assert_eq!(txn.merchant, "Starbucks");
        assert_eq!(txn.amount, Money::from_cents(-545));
        assert_eq!(service.count().unwrap(), 1);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_merchant() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .create(CreateTransactionInput::expense(
                "   ",
                date(2025, 1, 15),
                Money::from_cents(100),
                Category::Other,
            ))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_save_candidate() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let candidate = ParsedCandidate::new(
            "Target",
            Money::from_cents(4299),
            Category::Shopping,
            CandidateSource::Receipt,
        );
        let txn = service.save_candidate(&candidate, date(2025, 2, 3)).unwrap();

        assert_eq!(txn.source, EntrySource::Receipt);
        assert!(txn.is_expense());
        assert_eq!(txn.amount, Money::from_cents(-4299));
        assert!(service.find(&txn.id.to_string()).unwrap().is_some());
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service
            .create(CreateTransactionInput::expense("Uber", date(2025, 1, 3), Money::from_dollars(20), Category::Transport))
            .unwrap();
        service
            .create(CreateTransactionInput::expense("Kroger", date(2025, 1, 20), Money::from_dollars(80), Category::FoodAndDrink))
            .unwrap();
        service
            .create(CreateTransactionInput::expense("Lyft", date(2025, 2, 1), Money::from_dollars(15), Category::Transport))
            .unwrap();
        service
            .create(CreateTransactionInput {
                kind: TransactionType::Income,
                ..CreateTransactionInput::expense("Employer", date(2025, 1, 31), Money::from_dollars(3000), Category::Salary)
            })
            .unwrap();

        let all = service.list(TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].merchant, "Lyft");

        let transport = service
            .list(TransactionFilter::new().category(Category::Transport))
            .unwrap();
        assert_eq!(transport.len(), 2);

        let january = service
            .list(TransactionFilter::new().month(BudgetMonth::new(2025, 1).unwrap()))
            .unwrap();
        assert_eq!(january.len(), 3);

        let income = service
            .list(TransactionFilter::new().kind(TransactionType::Income))
            .unwrap();
        assert_eq!(income.len(), 1);
        assert!(income[0].amount.is_positive());

        let limited = service.list(TransactionFilter::new().limit(2)).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(CreateTransactionInput::expense("Netflix", date(2025, 1, 5), Money::from_cents(1549), Category::Entertainment))
            .unwrap();

        let deleted = service.delete(&txn.id.to_string()).unwrap();
        assert_eq!(deleted.id, txn.id);
        assert_eq!(service.count().unwrap(), 0);
        assert!(service.delete(&txn.id.to_string()).unwrap_err().is_not_found());
        assert_eq!(storage.audit().read_all().unwrap().len(), 2);
    }
}
