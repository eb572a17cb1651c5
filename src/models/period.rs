//! Budget month representation
//!
//! Budgets and income plans are kept per calendar month. A `BudgetMonth`
//! serializes as `"YYYY-MM"`.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month a budget applies to
///
/// Holds the first and last day of the month, so every value is a month
/// chrono can represent in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BudgetMonth {
    first: NaiveDate,
    last: NaiveDate,
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl BudgetMonth {
    fn from_parts(year: i32, month: u32) -> Option<Self> {
        Some(Self {
            first: NaiveDate::from_ymd_opt(year, month, 1)?,
            last: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?,
        })
    }

    /// Create a budget month, validating the month number and year range
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Self::from_parts(year, month).ok_or(PeriodParseError::YearOutOfRange(year))
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        // The month around a valid date is always representable
        Self::from_parts(date.year(), date.month()).unwrap_or(Self {
            first: date,
            last: date,
        })
    }

    /// The current month in local time
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.last
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// The following month; stays put at the end of the supported calendar
    pub fn next(&self) -> Self {
        let (year, month) = match self.month() {
            12 => (self.year() + 1, 1),
            m => (self.year(), m + 1),
        };
        Self::from_parts(year, month).unwrap_or(*self)
    }

    /// The preceding month; stays put at the start of the supported calendar
    pub fn prev(&self) -> Self {
        let (year, month) = match self.month() {
            1 => (self.year() - 1, 12),
            m => (self.year(), m - 1),
        };
        Self::from_parts(year, month).unwrap_or(*self)
    }

    /// English month name, e.g. "January"
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month() - 1) as usize]
    }

    /// Human-friendly label, e.g. "January 2025"
    pub fn friendly(&self) -> String {
        format!("{} {}", self.month_name(), self.year())
    }

    /// Parse a month relative to `today`
    ///
    /// Formats:
    /// - "2025-01"
    /// - "current", "last", "next"
    /// - "January" (in today's year) or "January 2025" / "jan 2025"
    pub fn parse_relative(s: &str, today: NaiveDate) -> Result<Self, PeriodParseError> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        let this_month = Self::from_date(today);

        match lower.as_str() {
            "current" | "this" | "now" => return Ok(this_month),
            "last" | "prev" | "previous" => return Ok(this_month.prev()),
            "next" => return Ok(this_month.next()),
            _ => {}
        }

        if let Some((year, month)) = lower.split_once('-') {
            let year: i32 = year
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(trimmed.to_string()))?;
            let month: u32 = month
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(trimmed.to_string()))?;
            return Self::new(year, month);
        }

        let mut parts = lower.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| PeriodParseError::InvalidFormat(trimmed.to_string()))?;
        let month = month_from_name(name)
            .ok_or_else(|| PeriodParseError::InvalidFormat(trimmed.to_string()))?;
        let year = match parts.next() {
            Some(year) => year
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(trimmed.to_string()))?,
            None => today.year(),
        };
        if parts.next().is_some() {
            return Err(PeriodParseError::InvalidFormat(trimmed.to_string()));
        }
        Self::new(year, month)
    }

    /// Parse a month relative to the current date
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        Self::parse_relative(s, chrono::Local::now().date_naive())
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    if name.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|m| m.to_lowercase().starts_with(name))
        .map(|idx| idx as u32 + 1)
}

impl Default for BudgetMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for BudgetMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BudgetMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| serde::de::Error::custom(PeriodParseError::InvalidFormat(s.clone())))?;
        let year: i32 = year.parse().map_err(serde::de::Error::custom)?;
        let month: u32 = month.parse().map_err(serde::de::Error::custom)?;
        Self::new(year, month).map_err(serde::de::Error::custom)
    }
}

/// Error type for month parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("Invalid month format: {0}")]
    InvalidFormat(String),

    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("Year {0} is outside the supported calendar")]
    YearOutOfRange(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds() {
        let feb = BudgetMonth::new(2024, 2).unwrap();
        assert_eq!(feb.start_date(), date(2024, 2, 1));
        assert_eq!(feb.end_date(), date(2024, 2, 29));

        let dec = BudgetMonth::new(2025, 12).unwrap();
        assert_eq!(dec.end_date(), date(2025, 12, 31));
    }

    #[test]
    fn test_contains() {
        let jan = BudgetMonth::new(2025, 1).unwrap();
        assert!(jan.contains(date(2025, 1, 1)));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
        assert!(!jan.contains(date(2024, 1, 15)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = BudgetMonth::new(2025, 1).unwrap();
        assert_eq!(jan.prev(), BudgetMonth::new(2024, 12).unwrap());
        assert_eq!(jan.prev().next(), jan);
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            BudgetMonth::new(2025, 13),
            Err(PeriodParseError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_parse_formats() {
        let today = date(2025, 3, 10);
        let march = BudgetMonth::new(2025, 3).unwrap();

        assert_eq!(BudgetMonth::parse_relative("2025-03", today), Ok(march));
        assert_eq!(BudgetMonth::parse_relative("current", today), Ok(march));
        assert_eq!(BudgetMonth::parse_relative("last", today), Ok(march.prev()));
        assert_eq!(BudgetMonth::parse_relative("next", today), Ok(march.next()));
        assert_eq!(BudgetMonth::parse_relative("March", today), Ok(march));
        assert_eq!(
            BudgetMonth::parse_relative("jan 2024", today),
            Ok(BudgetMonth::new(2024, 1).unwrap())
        );
        assert!(BudgetMonth::parse_relative("ma", today).is_err());
        assert!(BudgetMonth::parse_relative("2025-00", today).is_err());
        assert!(BudgetMonth::parse_relative("someday", today).is_err());
    }

    #[test]
    fn test_year_out_of_range() {
        let today = date(2025, 3, 10);
        assert_eq!(
            BudgetMonth::parse_relative("300000-01", today),
            Err(PeriodParseError::YearOutOfRange(300000))
        );
        assert!(BudgetMonth::new(-300000, 6).is_err());
        assert!(serde_json::from_str::<BudgetMonth>("\"300000-01\"").is_err());
    }

    #[test]
    fn test_calendar_edges_do_not_panic() {
        let last = BudgetMonth::from_date(NaiveDate::MAX);
        assert_eq!(last.end_date(), NaiveDate::MAX);
        assert_eq!(last.next(), last);

        let first = BudgetMonth::from_date(NaiveDate::MIN);
        assert_eq!(first.start_date(), NaiveDate::MIN);
        assert_eq!(first.prev(), first);
    }

    #[test]
    fn test_display_and_friendly() {
        let month = BudgetMonth::new(2025, 1).unwrap();
        assert_eq!(month.to_string(), "2025-01");
        assert_eq!(month.friendly(), "January 2025");
    }

    #[test]
    fn test_serialization() {
        let month = BudgetMonth::new(2025, 7).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-07\"");

        let back: BudgetMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);

        assert!(serde_json::from_str::<BudgetMonth>("\"2025-13\"").is_err());
    }
}
