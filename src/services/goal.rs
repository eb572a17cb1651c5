//! Savings goal service
//!
//! Creates, edits and funds goals. Every change is saved and then audited.

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{FinancialGoal, Money};
use crate::storage::Storage;

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub title: String,
    pub target: Money,
    pub current: Money,
    pub monthly_contribution: Money,
    pub color_index: u32,
}

/// Fields to change on an existing goal; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    pub title: Option<String>,
    pub target: Option<Money>,
    pub current: Option<Money>,
    pub monthly_contribution: Option<Money>,
    pub color_index: Option<u32>,
}

pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, input: CreateGoalInput) -> TallyResult<FinancialGoal> {
        let title = input.title.trim().to_string();
        self.ensure_unique_title(&title, None)?;

        let goal = FinancialGoal::new(title, input.current, input.target)
            .with_monthly_contribution(input.monthly_contribution)
            .with_color(input.color_index);

        goal.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_create(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.title.clone()),
            &goal,
        )?;

        Ok(goal)
    }

    pub fn list(&self) -> TallyResult<Vec<FinancialGoal>> {
        self.storage.goals.get_all()
    }

    /// Find a goal by id or title
    pub fn find(&self, identifier: &str) -> TallyResult<FinancialGoal> {
        self.storage
            .goals
            .find(identifier)?
            .ok_or_else(|| TallyError::goal_not_found(identifier))
    }

    pub fn update(&self, identifier: &str, input: UpdateGoalInput) -> TallyResult<FinancialGoal> {
        let mut goal = self.find(identifier)?;
        let before = goal.clone();

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            self.ensure_unique_title(&title, Some(&goal))?;
            goal.title = title;
        }
        if let Some(target) = input.target {
            goal.target = target;
        }
        if let Some(current) = input.current {
            goal.current = current;
        }
        if let Some(monthly) = input.monthly_contribution {
            goal.monthly_contribution = monthly;
        }
        if let Some(color) = input.color_index {
            goal.color_index = color;
        }

        goal.validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        if goal == before {
            return Ok(goal);
        }
        goal.updated_at = chrono::Utc::now();

        self.persist_update(&before, &goal)?;
        Ok(goal)
    }

    /// Add to (or with a negative amount, take from) a goal's saved total
    pub fn contribute(&self, identifier: &str, amount: Money) -> TallyResult<FinancialGoal> {
        let mut goal = self.find(identifier)?;
        let before = goal.clone();

        goal.contribute(amount)
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.persist_update(&before, &goal)?;

        if goal.is_complete() && !before.is_complete() {
            log::info!("Goal {} reached its target", goal.title);
        }
        Ok(goal)
    }

    pub fn delete(&self, identifier: &str) -> TallyResult<FinancialGoal> {
        let goal = self.find(identifier)?;

        self.storage.goals.delete(goal.id)?;
        self.storage.goals.save()?;

        self.storage.log_delete(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.title.clone()),
            &goal,
        )?;

        Ok(goal)
    }

    fn persist_update(&self, before: &FinancialGoal, goal: &FinancialGoal) -> TallyResult<()> {
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_update(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.title.clone()),
            before,
            goal,
        )
    }

    fn ensure_unique_title(&self, title: &str, current: Option<&FinancialGoal>) -> TallyResult<()> {
        let clash = self
            .list()?
            .into_iter()
            .any(|g| g.title.eq_ignore_ascii_case(title) && current.map_or(true, |c| c.id != g.id));
        if clash {
            return Err(TallyError::Duplicate {
                entity_type: "Goal",
                identifier: title.to_string(),
            });
        }
        Ok(())
    }
}
