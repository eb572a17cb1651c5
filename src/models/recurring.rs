//! Recurring transaction templates
//!
//! A template produces a concrete `Transaction` each time it comes due, then
//! moves its due date forward by one step of its frequency.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::RecurringId;
use super::money::Money;
use super::transaction::{EntrySource, Transaction, TransactionType};

/// How often a template repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn all() -> &'static [Self] {
        &[
            Self::Daily,
            Self::Weekly,
            Self::BiWeekly,
            Self::Monthly,
            Self::Quarterly,
            Self::Yearly,
        ]
    }

    /// The date one step after `date`
    ///
    /// Month-based steps clamp to the end of shorter months (Jan 31 -> Feb 28).
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        let next = match self {
            Self::Daily => date.checked_add_signed(Duration::days(1)),
            Self::Weekly => date.checked_add_signed(Duration::weeks(1)),
            Self::BiWeekly => date.checked_add_signed(Duration::weeks(2)),
            Self::Monthly => date.checked_add_months(Months::new(1)),
            Self::Quarterly => date.checked_add_months(Months::new(3)),
            Self::Yearly => date.checked_add_months(Months::new(12)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "fortnightly" => Ok(Self::BiWeekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annually" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

/// A template for a transaction that repeats on a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: RecurringId,
    pub merchant: String,

    /// Amount as entered; the sign is applied when a transaction is generated
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    #[serde(default)]
    pub category: Category,

    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub next_due: NaiveDate,

    #[serde(default)]
    pub last_generated: Option<NaiveDate>,

    #[serde(default = "default_active")]
    pub active: bool,

    /// Days of warning before the due date
    #[serde(default = "default_notify_days")]
    pub notify_before_days: u32,

    #[serde(default)]
    pub note: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

fn default_notify_days() -> u32 {
    1
}

impl RecurringTransaction {
    /// Create a template whose first occurrence is `start_date`
    pub fn new(
        merchant: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: Category,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecurringId::new(),
            merchant: merchant.into(),
            amount: amount.abs(),
            kind,
            category,
            frequency,
            start_date,
            next_due: start_date,
            last_generated: None,
            active: true,
            notify_before_days: default_notify_days(),
            note: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the template should generate on `today`
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.active && self.next_due <= today
    }

    /// Move the due date forward by one step
    pub fn advance(&mut self) {
        self.next_due = self.frequency.advance(self.next_due);
        self.updated_at = Utc::now();
    }

    /// Build the transaction for the current due date without advancing
    pub fn generate(&self) -> Transaction {
        let mut txn = Transaction::new(
            self.merchant.clone(),
            self.next_due,
            self.amount,
            self.kind,
            self.category,
        )
        .with_source(EntrySource::Recurring);
        txn.note = self.note.clone();
        txn
    }

    /// Days from `today` until the next due date (negative when overdue)
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.next_due - today).num_days()
    }

    pub fn pause(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    pub fn resume(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    /// Validate the template
    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if self.merchant.trim().is_empty() {
            return Err(RecurringValidationError::EmptyMerchant);
        }
        if self.amount.is_zero() {
            return Err(RecurringValidationError::ZeroAmount);
        }
        if self.next_due < self.start_date {
            return Err(RecurringValidationError::DueBeforeStart);
        }
        Ok(())
    }
}

impl fmt::Display for RecurringTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (next {})",
            self.merchant,
            self.amount,
            self.frequency,
            self.next_due.format("%Y-%m-%d")
        )
    }
}

/// Validation errors for recurring templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    EmptyMerchant,
    ZeroAmount,
    DueBeforeStart,
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMerchant => write!(f, "Merchant cannot be empty"),
            Self::ZeroAmount => write!(f, "Amount cannot be zero"),
            Self::DueBeforeStart => write!(f, "Next due date is before the start date"),
        }
    }
}

impl std::error::Error for RecurringValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_based_steps() {
        let start = date(2025, 1, 1);
        assert_eq!(Frequency::Daily.advance(start), date(2025, 1, 2));
        assert_eq!(Frequency::Weekly.advance(start), date(2025, 1, 8));
        assert_eq!(Frequency::BiWeekly.advance(start), date(2025, 1, 15));
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        assert_eq!(Frequency::Monthly.advance(date(2025, 1, 31)), date(2025, 2, 28));
        assert_eq!(Frequency::Monthly.advance(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(Frequency::Quarterly.advance(date(2025, 11, 30)), date(2026, 2, 28));
        assert_eq!(Frequency::Yearly.advance(date(2024, 2, 29)), date(2025, 2, 28));
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("bi-weekly".parse::<Frequency>(), Ok(Frequency::BiWeekly));
        assert_eq!("Monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_generate_and_advance() {
        let mut rec = RecurringTransaction::new(
            "Netflix",
            Money::from_cents(1599),
            TransactionType::Expense,
            Category::Entertainment,
            Frequency::Monthly,
            date(2025, 1, 31),
        );

        let txn = rec.generate();
        assert_eq!(txn.date, date(2025, 1, 31));
        assert_eq!(txn.amount, Money::from_cents(-1599));
        assert_eq!(txn.source, EntrySource::Recurring);

        rec.advance();
        assert_eq!(rec.next_due, date(2025, 2, 28));
    }

    #[test]
    fn test_is_due() {
        let mut rec = RecurringTransaction::new(
            "Rent",
            Money::from_dollars(1500),
            TransactionType::Expense,
            Category::Bills,
            Frequency::Monthly,
            date(2025, 3, 1),
        );

        assert!(!rec.is_due(date(2025, 2, 28)));
        assert!(rec.is_due(date(2025, 3, 1)));
        assert_eq!(rec.days_until_due(date(2025, 2, 26)), 3);

        rec.pause();
        assert!(!rec.is_due(date(2025, 3, 5)));
    }

    #[test]
    fn test_validation() {
        let mut rec = RecurringTransaction::new(
            "Gym",
            Money::from_dollars(40),
            TransactionType::Expense,
            Category::Health,
            Frequency::Monthly,
            date(2025, 1, 1),
        );
        assert!(rec.validate().is_ok());

        rec.amount = Money::zero();
        assert_eq!(rec.validate(), Err(RecurringValidationError::ZeroAmount));
    }
}
