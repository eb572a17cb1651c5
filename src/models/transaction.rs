//! Transaction model
//!
//! A transaction is a single income or expense entry. The amount is signed:
//! income is positive, expenses are negative.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::{CandidateSource, ParsedCandidate};
use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// How a transaction entered the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    #[default]
    Manual,
    Receipt,
    Voice,
    Recurring,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "Manual"),
            Self::Receipt => write!(f, "Receipt"),
            Self::Voice => write!(f, "Voice"),
            Self::Recurring => write!(f, "Recurring"),
        }
    }
}

impl From<CandidateSource> for EntrySource {
    fn from(source: CandidateSource) -> Self {
        match source {
            CandidateSource::Receipt => Self::Receipt,
            CandidateSource::Voice => Self::Voice,
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Merchant or description
    pub merchant: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for income, negative for expenses)
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Spending category
    #[serde(default)]
    pub category: Category,

    /// Display hint, derived from the category at creation
    #[serde(default)]
    pub icon: String,

    /// Where this transaction came from
    #[serde(default)]
    pub source: EntrySource,

    /// Free-form note
    #[serde(default)]
    pub note: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction; the amount's sign is normalised to match `kind`
    pub fn new(
        merchant: impl Into<String>,
        date: NaiveDate,
        amount: Money,
        kind: TransactionType,
        category: Category,
    ) -> Self {
        let amount = match kind {
            TransactionType::Income => amount.abs(),
            TransactionType::Expense => -amount.abs(),
        };
        Self {
            id: TransactionId::new(),
            merchant: merchant.into(),
            date,
            amount,
            kind,
            category,
            icon: category.icon().to_string(),
            source: EntrySource::Manual,
            note: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Create an expense (stored negative)
    pub fn expense(
        merchant: impl Into<String>,
        date: NaiveDate,
        amount: Money,
        category: Category,
    ) -> Self {
        Self::new(merchant, date, amount, TransactionType::Expense, category)
    }

    /// Create an income entry (stored positive)
    pub fn income(
        merchant: impl Into<String>,
        date: NaiveDate,
        amount: Money,
        category: Category,
    ) -> Self {
        Self::new(merchant, date, amount, TransactionType::Income, category)
    }

    /// Build an expense from a confirmed parser candidate
    pub fn from_candidate(candidate: &ParsedCandidate, date: NaiveDate) -> Self {
        let mut txn = Self::expense(
            candidate.merchant.clone(),
            date,
            candidate.amount,
            candidate.category,
        );
        txn.source = candidate.source.into();
        txn
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Set the entry source
    pub fn with_source(mut self, source: EntrySource) -> Self {
        self.source = source;
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.merchant.trim().is_empty() {
            return Err(TransactionValidationError::EmptyMerchant);
        }

        if self.amount.is_zero() {
            return Err(TransactionValidationError::ZeroAmount);
        }

        let sign_ok = match self.kind {
            TransactionType::Income => self.amount.is_positive(),
            TransactionType::Expense => self.amount.is_negative(),
        };
        if !sign_ok {
            return Err(TransactionValidationError::SignMismatch {
                kind: self.kind,
                amount: self.amount,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.merchant,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyMerchant,
    ZeroAmount,
    SignMismatch { kind: TransactionType, amount: Money },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMerchant => write!(f, "Merchant cannot be empty"),
            Self::ZeroAmount => write!(f, "Amount cannot be zero"),
            Self::SignMismatch { kind, amount } => {
                write!(f, "{} transaction has amount with wrong sign ({})", kind, amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
