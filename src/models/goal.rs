//! Savings goals
//!
//! A goal tracks money set aside toward a target, with a planned monthly
//! contribution and a palette colour for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// Colour names a goal's `color_index` cycles through
pub const GOAL_COLORS: [&str; 6] = ["mint", "turquoise", "purple", "orange", "pink", "blue"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub title: String,

    /// Saved so far
    pub current: Money,

    pub target: Money,

    #[serde(default)]
    pub monthly_contribution: Money,

    #[serde(default)]
    pub color_index: u32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialGoal {
    pub fn new(title: impl Into<String>, current: Money, target: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            title: title.into(),
            current,
            target,
            monthly_contribution: Money::zero(),
            color_index: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_monthly_contribution(mut self, amount: Money) -> Self {
        self.monthly_contribution = amount;
        self
    }

    pub fn with_color(mut self, index: u32) -> Self {
        self.color_index = index;
        self
    }

    /// Share of the target saved, capped at 1.0; a goal with no target has no progress
    pub fn progress(&self) -> f64 {
        if !self.target.is_positive() {
            return 0.0;
        }
        self.current.ratio_of(self.target).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.target.is_positive() && self.current >= self.target
    }

    /// Amount still to save, never negative
    pub fn remaining(&self) -> Money {
        self.target
            .checked_sub(self.current)
            .filter(|m| m.is_positive())
            .unwrap_or_default()
    }

    /// Whole months of contributions needed to reach the target
    ///
    /// `None` when nothing is planned per month and the goal is still open.
    pub fn months_to_target(&self) -> Option<i64> {
        let remaining = self.remaining().cents();
        if remaining == 0 {
            return Some(0);
        }
        let monthly = self.monthly_contribution.cents();
        if monthly <= 0 {
            return None;
        }
        Some(remaining / monthly + i64::from(remaining % monthly != 0))
    }

    pub fn color_name(&self) -> &'static str {
        GOAL_COLORS[self.color_index as usize % GOAL_COLORS.len()]
    }

    /// Add `amount` to the saved total; a negative amount withdraws
    pub fn contribute(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if amount.is_zero() {
            return Err(GoalValidationError::ZeroContribution);
        }
        let current = self
            .current
            .checked_add(amount)
            .ok_or(GoalValidationError::AmountTooLarge)?;
        if current.is_negative() {
            return Err(GoalValidationError::NegativeAmount("Saved amount"));
        }
        self.current = current;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if self.current.is_negative() {
            return Err(GoalValidationError::NegativeAmount("Saved amount"));
        }
        if self.target.is_negative() {
            return Err(GoalValidationError::NegativeAmount("Target"));
        }
        if self.monthly_contribution.is_negative() {
            return Err(GoalValidationError::NegativeAmount("Monthly contribution"));
        }
        Ok(())
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} ({}%)",
            self.title,
            self.current,
            self.target,
            (self.progress() * 100.0) as u32
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    NegativeAmount(&'static str),
    ZeroContribution,
    AmountTooLarge,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::NegativeAmount(field) => write!(f, "{} cannot be negative", field),
            Self::ZeroContribution => write!(f, "Contribution cannot be zero"),
            Self::AmountTooLarge => write!(f, "Amount is too large"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current: i64, target: i64) -> FinancialGoal {
        FinancialGoal::new("Emergency fund", Money::from_dollars(current), Money::from_dollars(target))
    }

    #[test]
    fn test_progress() {
        assert_eq!(goal(250, 1000).progress(), 0.25);
        assert_eq!(goal(0, 1000).progress(), 0.0);
        assert_eq!(goal(1000, 1000).progress(), 1.0);
    }

    #[test]
    fn test_progress_is_capped() {
        let over = goal(1500, 1000);
        assert_eq!(over.progress(), 1.0);
        assert!(over.is_complete());
        assert_eq!(over.remaining(), Money::zero());
    }

    #[test]
    fn test_zero_target_has_no_progress() {
        let g = goal(300, 0);
        assert_eq!(g.progress(), 0.0);
        assert!(!g.is_complete());
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_months_to_target() {
        let g = goal(100, 1000).with_monthly_contribution(Money::from_dollars(200));
        assert_eq!(g.remaining(), Money::from_dollars(900));
        assert_eq!(g.months_to_target(), Some(5));

        assert_eq!(goal(100, 1000).months_to_target(), None);
        assert_eq!(goal(1000, 1000).months_to_target(), Some(0));
    }

    #[test]
    fn test_contribute() {
        let mut g = goal(100, 1000);
        g.contribute(Money::from_dollars(50)).unwrap();
        assert_eq!(g.current, Money::from_dollars(150));

        g.contribute(Money::from_dollars(-150)).unwrap();
        assert_eq!(g.current, Money::zero());

        assert_eq!(
            g.contribute(Money::from_dollars(-1)),
            Err(GoalValidationError::NegativeAmount("Saved amount"))
        );
        assert_eq!(g.contribute(Money::zero()), Err(GoalValidationError::ZeroContribution));
        assert_eq!(g.current, Money::zero());
    }

    #[test]
    fn test_validation_and_colors() {
        let mut g = goal(0, 500).with_color(7);
        assert_eq!(g.color_name(), "turquoise");

        g.title = "   ".into();
        assert_eq!(g.validate(), Err(GoalValidationError::EmptyTitle));

        g.title = "Vacation".into();
        g.monthly_contribution = Money::from_dollars(-5);
        assert!(g.validate().is_err());
    }
}
