//! Storage initialization
//!
//! Handles first-run setup and default budget creation

use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::error::TallyError;
use crate::models::{Category, CategoryBudget, IncomePlan};

use super::budgets::BudgetData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Writes the settings file and a default budget (one line per built-in
/// category) unless they already exist. Returns whether anything was created.
pub fn initialize_storage(paths: &TallyPaths, settings: &Settings) -> Result<bool, TallyError> {
    paths.ensure_directories()?;

    let mut created = false;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
        created = true;
    }

    if !paths.budgets_file().exists() {
        write_json_atomic(paths.budgets_file(), &default_budget(settings))?;
        log::info!("Created default budget at {}", paths.budgets_file().display());
        created = true;
    }

    Ok(created)
}

/// One budget line per built-in category, seeded with its default limit
pub fn default_budget(settings: &Settings) -> BudgetData {
    let categories = Category::all()
        .iter()
        .enumerate()
        .map(|(i, category)| CategoryBudget::for_category(*category, i as i32))
        .collect();

    BudgetData {
        categories,
        income: IncomePlan::new(settings.monthly_income),
    }
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TallyPaths) -> bool {
    !paths.settings_file().exists() || !paths.budgets_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::file_io::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            monthly_income: Money::from_dollars(3000),
            ..Settings::default()
        };

        assert!(needs_initialization(&paths));
        assert!(initialize_storage(&paths, &settings).unwrap());
        assert!(!needs_initialization(&paths));

        let data: BudgetData = read_json(paths.budgets_file()).unwrap();
        assert_eq!(data.categories.len(), Category::all().len());
        assert_eq!(data.income.standing, Money::from_dollars(3000));

        let food = &data.categories[0];
        assert_eq!(food.category_id, "Food & Drink");
        assert_eq!(food.limit, Money::from_dollars(600));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths, &Settings::default()).unwrap());
        assert!(!initialize_storage(&paths, &Settings::default()).unwrap());
    }
}
