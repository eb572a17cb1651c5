//! Savings goal repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::{FinancialGoal, GoalId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<FinancialGoal>,
}

pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoalId, FinancialGoal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for goal in file_data.goals {
            data.insert(goal.id, goal);
        }

        log::debug!("Loaded {} goals", data.len());
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let goals = self.get_all()?;
        write_json_atomic(&self.path, &GoalData { goals })
    }

    /// All goals in the order they were created
    pub fn get_all(&self) -> Result<Vec<FinancialGoal>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(goals)
    }

    /// Find a goal by id (full or short) or by its title, ignoring case
    pub fn find(&self, identifier: &str) -> Result<Option<FinancialGoal>, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        if let Ok(id) = identifier.parse::<GoalId>() {
            return Ok(data.get(&id).cloned());
        }

        let wanted = identifier.trim().to_lowercase();
        if let Some(goal) = data.values().find(|g| g.title.to_lowercase() == wanted) {
            return Ok(Some(goal.clone()));
        }

        let mut matches = data.values().filter(|g| g.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(goal), None) => Ok(Some(goal.clone())),
            (Some(_), Some(_)) => Err(TallyError::Validation(format!(
                "Goal id '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    pub fn upsert(&self, goal: FinancialGoal) -> Result<(), TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(goal.id, goal);
        Ok(())
    }

    pub fn delete(&self, id: GoalId) -> Result<Option<FinancialGoal>, TallyError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self
            .data
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn goal(title: &str) -> FinancialGoal {
        FinancialGoal::new(title, Money::zero(), Money::from_dollars(1000))
    }

    #[test]
    fn test_find_by_title_or_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));
        let car = goal("New Car");
        let id = car.id;
        repo.upsert(car).unwrap();

        assert_eq!(repo.find("new car").unwrap().unwrap().id, id);
        assert_eq!(repo.find(&id.to_string()).unwrap().unwrap().id, id);
        assert!(repo.find("House").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");
        let repo = GoalRepository::new(path.clone());
        repo.upsert(goal("Vacation").with_color(3)).unwrap();
        repo.save().unwrap();

        let repo2 = GoalRepository::new(path);
        repo2.load().unwrap();
        let goals = repo2.get_all().unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].title, "Vacation");
        assert_eq!(goals[0].color_index, 3);
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));
        let g = goal("Laptop");
        let id = g.id;
        repo.upsert(g).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.delete(id).unwrap().is_none());
    }
}
