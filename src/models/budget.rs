//! Budget models
//!
//! A `CategoryBudget` holds a standing monthly limit for one category plus
//! optional per-month overrides. The `IncomePlan` does the same for planned
//! monthly income.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;
use super::period::BudgetMonth;

/// A replacement limit for a single month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOverride {
    pub month: BudgetMonth,
    pub limit: Money,
}

/// Planned spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// Category identifier, matched against `Category::id()` of transactions
    pub category_id: String,

    /// Display name
    pub name: String,

    /// Icon hint
    #[serde(default)]
    pub icon: String,

    /// Standing monthly limit
    pub limit: Money,

    /// Sort order for display
    #[serde(default)]
    pub sort_order: i32,

    /// Hidden categories are excluded from totals
    #[serde(default)]
    pub hidden: bool,

    /// Per-month limit overrides, at most one per month
    #[serde(default)]
    pub overrides: Vec<LimitOverride>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl CategoryBudget {
    /// Create a budget line with an arbitrary identifier
    pub fn new(category_id: impl Into<String>, name: impl Into<String>, limit: Money) -> Self {
        Self {
            category_id: category_id.into(),
            name: name.into(),
            icon: String::new(),
            limit,
            sort_order: 0,
            hidden: false,
            overrides: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Create the default budget line for a built-in category
    pub fn for_category(category: Category, sort_order: i32) -> Self {
        let mut budget = Self::new(category.id(), category.name(), category.default_limit());
        budget.icon = category.icon().to_string();
        budget.sort_order = sort_order;
        budget
    }

    /// Limit in effect for `month`: the override if one exists, else the standing limit
    pub fn limit_for(&self, month: BudgetMonth) -> Money {
        self.override_for(month)
            .map(|o| o.limit)
            .unwrap_or(self.limit)
    }

    /// The override for `month`, if any
    pub fn override_for(&self, month: BudgetMonth) -> Option<&LimitOverride> {
        self.overrides.iter().find(|o| o.month == month)
    }

    /// Set or replace the override for `month`
    pub fn set_override(&mut self, month: BudgetMonth, limit: Money) {
        match self.overrides.iter_mut().find(|o| o.month == month) {
            Some(existing) => existing.limit = limit,
            None => self.overrides.push(LimitOverride { month, limit }),
        }
        self.updated_at = Utc::now();
    }

    /// Remove the override for `month`, returning whether one existed
    pub fn clear_override(&mut self, month: BudgetMonth) -> bool {
        let before = self.overrides.len();
        self.overrides.retain(|o| o.month != month);
        let removed = self.overrides.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Set the standing limit
    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.updated_at = Utc::now();
    }

    /// Whether this line tracks `category`
    pub fn tracks(&self, category: Category) -> bool {
        self.category_id == category.id()
    }

    /// Validate the budget line
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category_id.trim().is_empty() {
            return Err(BudgetValidationError::EmptyCategoryId);
        }
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit(self.limit));
        }
        if let Some(o) = self.overrides.iter().find(|o| o.limit.is_negative()) {
            return Err(BudgetValidationError::NegativeLimit(o.limit));
        }
        Ok(())
    }
}

impl fmt::Display for CategoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.limit)
    }
}

/// Planned income for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub month: BudgetMonth,
    pub amount: Money,
}

/// Standing monthly income plus per-month overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomePlan {
    /// Income assumed for any month without an override
    #[serde(default)]
    pub standing: Money,

    #[serde(default)]
    pub overrides: Vec<MonthlyIncome>,
}

impl IncomePlan {
    pub fn new(standing: Money) -> Self {
        Self {
            standing,
            overrides: Vec::new(),
        }
    }

    /// Income for `month`: the override if one exists, else the standing amount
    pub fn income_for(&self, month: BudgetMonth) -> Money {
        self.overrides
            .iter()
            .find(|m| m.month == month)
            .map(|m| m.amount)
            .unwrap_or(self.standing)
    }

    /// Set or replace the income for `month`
    pub fn set_for_month(&mut self, month: BudgetMonth, amount: Money) {
        match self.overrides.iter_mut().find(|m| m.month == month) {
            Some(existing) => existing.amount = amount,
            None => self.overrides.push(MonthlyIncome { month, amount }),
        }
    }

    /// Whether `month` has its own income figure
    pub fn has_override(&self, month: BudgetMonth) -> bool {
        self.overrides.iter().any(|m| m.month == month)
    }
}

/// Validation errors for budget lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyCategoryId,
    EmptyName,
    NegativeLimit(Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategoryId => write!(f, "Category identifier cannot be empty"),
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NegativeLimit(limit) => write!(f, "Limit cannot be negative: {}", limit),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
