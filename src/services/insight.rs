//! Spending insight
//!
//! One line of advice derived from a month's budget overview.

use std::fmt;

use super::budget::BudgetOverview;

/// Name used when nothing has been spent in any visible category
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// How worried the user should be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightLevel {
    /// More than 80% of the budget is gone
    Warning,
    /// More than half of the budget is gone
    Elevated,
    /// Nothing spent yet
    NoSpending,
    OnTrack,
}

impl fmt::Display for InsightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Elevated => write!(f, "elevated"),
            Self::NoSpending => write!(f, "no spending"),
            Self::OnTrack => write!(f, "on track"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpendingInsight {
    pub level: InsightLevel,
    /// Whole percent of the total budget spent, truncated
    pub percent_used: i64,
    pub top_category: String,
    pub message: String,
}

impl SpendingInsight {
    pub fn from_overview(overview: &BudgetOverview) -> Self {
        let percent = overview.percent_used();
        let whole = percent.trunc() as i64;
        let top_category = overview
            .top_category()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        let (level, message) = if percent > 80.0 {
            (
                InsightLevel::Warning,
                format!(
                    "You've used {}% of your budget. Watch {}!",
                    whole, top_category
                ),
            )
        } else if percent > 50.0 {
            (
                InsightLevel::Elevated,
                format!("{}% spent. {} is your top category.", whole, top_category),
            )
        } else if overview.total_spent.is_zero() {
            (
                InsightLevel::NoSpending,
                "No spending tracked yet this month. Add transactions to see insights!"
                    .to_string(),
            )
        } else {
            (
                InsightLevel::OnTrack,
                format!("On track! Only {}% of budget used so far.", whole),
            )
        };

        Self {
            level,
            percent_used: whole,
            top_category,
            message,
        }
    }
}

impl fmt::Display for SpendingInsight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
