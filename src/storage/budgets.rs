//! Budget repository for JSON storage
//!
//! Category budget lines and the income plan live together in budgets.json.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::models::{CategoryBudget, IncomePlan};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of budgets.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetData {
    #[serde(default)]
    pub categories: Vec<CategoryBudget>,
    #[serde(default)]
    pub income: IncomePlan,
}

/// Repository for category budgets and planned income
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<BudgetData>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BudgetData::default()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;

        log::debug!("Loaded {} category budgets", data.categories.len());
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// All budget lines in display order
    pub fn get_all(&self) -> Result<Vec<CategoryBudget>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories = data.categories.clone();
        categories.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    /// Find a budget line by identifier or name, ignoring case
    pub fn get(&self, identifier: &str) -> Result<Option<CategoryBudget>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let wanted = identifier.trim().to_lowercase();
        Ok(data
            .categories
            .iter()
            .find(|c| c.category_id.to_lowercase() == wanted || c.name.to_lowercase() == wanted)
            .cloned())
    }

    /// Insert or replace a budget line keyed by `category_id`
    pub fn upsert(&self, budget: CategoryBudget) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data
            .categories
            .iter_mut()
            .find(|c| c.category_id == budget.category_id)
        {
            Some(existing) => *existing = budget,
            None => data.categories.push(budget),
        }
        Ok(())
    }

    pub fn income(&self) -> Result<IncomePlan, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.income.clone())
    }

    pub fn set_income(&self, income: IncomePlan) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.income = income;
        Ok(())
    }

    /// Copy of everything held, for exports
    pub fn snapshot(&self) -> Result<BudgetData, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    pub fn is_empty(&self) -> Result<bool, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.categories.is_empty())
    }
}
