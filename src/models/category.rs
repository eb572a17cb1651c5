//! Spending categories
//!
//! Transactions are filed under a fixed, closed set of categories. Each
//! category carries a display name (which doubles as its identifier in
//! budget records), an icon hint for front ends and a default monthly limit
//! used when seeding a fresh budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// A transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FoodAndDrink,
    Transport,
    Shopping,
    Entertainment,
    Health,
    Bills,
    Salary,
    Investment,
    Freelance,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::FoodAndDrink,
            Self::Transport,
            Self::Shopping,
            Self::Entertainment,
            Self::Health,
            Self::Bills,
            Self::Salary,
            Self::Investment,
            Self::Freelance,
            Self::Other,
        ]
    }

    /// Display name, also used as the category identifier in budgets
    pub fn name(&self) -> &'static str {
        match self {
            Self::FoodAndDrink => "Food & Drink",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Bills => "Bills",
            Self::Salary => "Salary",
            Self::Investment => "Investment",
            Self::Freelance => "Freelance",
            Self::Other => "Other",
        }
    }

    /// Identifier matched against `CategoryBudget::category_id`
    pub fn id(&self) -> &'static str {
        self.name()
    }

    /// Icon hint for front ends
    pub fn icon(&self) -> &'static str {
        match self {
            Self::FoodAndDrink => "cup.and.saucer.fill",
            Self::Transport => "car.fill",
            Self::Shopping => "bag.fill",
            Self::Entertainment => "film.fill",
            Self::Health => "heart.fill",
            Self::Bills => "doc.text.fill",
            Self::Salary => "banknote.fill",
            Self::Investment => "chart.line.uptrend.xyaxis",
            Self::Freelance => "briefcase.fill",
            Self::Other => "questionmark.circle.fill",
        }
    }

    /// Monthly limit given to this category when a budget is first created
    pub fn default_limit(&self) -> Money {
        match self {
            Self::FoodAndDrink => Money::from_dollars(600),
            Self::Transport => Money::from_dollars(300),
            Self::Shopping => Money::from_dollars(400),
            Self::Entertainment => Money::from_dollars(200),
            Self::Health => Money::from_dollars(150),
            Self::Bills => Money::from_dollars(1200),
            Self::Other => Money::from_dollars(200),
            // Income categories don't carry spending limits
            Self::Salary | Self::Investment | Self::Freelance => Money::zero(),
        }
    }

    /// Whether this category normally holds income
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Salary | Self::Investment | Self::Freelance)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts the display name ("Food & Drink") or an identifier style
    /// spelling ("food_and_drink", "food-and-drink", "food")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        let category = match key.as_str() {
            "fooddrink" | "foodanddrink" | "food" => Self::FoodAndDrink,
            "transport" | "transportation" => Self::Transport,
            "shopping" => Self::Shopping,
            "entertainment" => Self::Entertainment,
            "health" => Self::Health,
            "bills" => Self::Bills,
            "salary" => Self::Salary,
            "investment" => Self::Investment,
            "freelance" => Self::Freelance,
            "other" => Self::Other,
            _ => return Err(CategoryParseError(s.to_string())),
        };
        Ok(category)
    }
}

/// Error for unrecognised category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for CategoryParseError {}
