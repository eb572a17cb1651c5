//! Budget aggregation and budget management
//!
//! `BudgetAggregator` is a pure roll-up of transactions against category
//! budgets for one month. `BudgetService` wraps it with storage and handles
//! edits to limits, overrides and planned income.

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{BudgetMonth, Category, CategoryBudget, IncomePlan, Money, Transaction};
use crate::storage::Storage;

/// Spending against one category's budget for a month
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category_id: String,
    pub name: String,
    pub icon: String,
    pub spent: Money,
    pub budget: Money,
    /// Budget minus spent; negative when over budget
    pub remaining: Money,
    /// spent / budget clamped to [0, 1]; 0 when the budget is 0
    pub progress: f64,
    pub over_budget: bool,
    /// Whether `budget` comes from a per-month override
    pub has_override: bool,
}

/// Budget roll-up for one month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    pub month: BudgetMonth,
    pub income: Money,
    pub total_spent: Money,
    pub total_budget: Money,
    /// Planned income minus total planned budget
    pub free_cash_flow: Money,
    /// Visible categories in display order
    pub categories: Vec<CategorySummary>,
}

impl BudgetOverview {
    /// Total budget minus total spent
    pub fn remaining(&self) -> Money {
        self.total_budget
            .checked_sub(self.total_spent)
            .unwrap_or_else(Money::zero)
    }

    /// Share of the total budget already spent, as a percentage
    ///
    /// 0 when the total budget is 0.
    pub fn percent_used(&self) -> f64 {
        if self.total_budget.is_zero() {
            return 0.0;
        }
        self.total_spent.cents() as f64 * 100.0 / self.total_budget.cents() as f64
    }

    /// The visible category with the highest spend, if anything was spent
    ///
    /// Ties keep the earlier category.
    pub fn top_category(&self) -> Option<&CategorySummary> {
        self.categories.iter().fold(None, |best, c| match best {
            Some(b) if c.spent <= b.spent => Some(b),
            _ if c.spent.is_positive() => Some(c),
            other => other,
        })
    }
}

/// Pure roll-up of transactions against category budgets
pub struct BudgetAggregator<'a> {
    transactions: &'a [Transaction],
    budgets: &'a [CategoryBudget],
    income: &'a IncomePlan,
}

impl<'a> BudgetAggregator<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        budgets: &'a [CategoryBudget],
        income: &'a IncomePlan,
    ) -> Self {
        Self {
            transactions,
            budgets,
            income,
        }
    }

    /// Sum of |amount| over expenses in `budget`'s category dated within `month`
    pub fn spent_in_category(&self, budget: &CategoryBudget, month: BudgetMonth) -> Money {
        self.transactions
            .iter()
            .filter(|t| {
                t.is_expense() && t.category.id() == budget.category_id && month.contains(t.date)
            })
            .map(|t| t.amount.abs())
            .fold(Money::zero(), |acc, amount| {
                checked_total(acc, amount, &budget.category_id)
            })
    }

    /// Limit in effect for `month`: the override if present, else the standing limit
    pub fn budget_for_category(&self, budget: &CategoryBudget, month: BudgetMonth) -> Money {
        budget.limit_for(month)
    }

    /// Sum of limits over visible categories
    pub fn total_budget(&self, month: BudgetMonth) -> Money {
        self.visible()
            .map(|b| (b, self.budget_for_category(b, month)))
            .fold(Money::zero(), |acc, (b, limit)| {
                checked_total(acc, limit, &b.category_id)
            })
    }

    /// Sum of spending over visible categories
    pub fn total_spent(&self, month: BudgetMonth) -> Money {
        self.visible()
            .map(|b| (b, self.spent_in_category(b, month)))
            .fold(Money::zero(), |acc, (b, spent)| {
                checked_total(acc, spent, &b.category_id)
            })
    }

    /// Planned income for `month`
    pub fn income(&self, month: BudgetMonth) -> Money {
        self.income.income_for(month)
    }

    /// Planned income minus total budget
    pub fn free_cash_flow(&self, month: BudgetMonth) -> Money {
        let income = self.income(month);
        income
            .checked_sub(self.total_budget(month))
            .unwrap_or_else(|| {
                log::warn!("Free cash flow for {} overflowed; ignoring total budget", month);
                income
            })
    }

    /// Summary for a single budget line
    pub fn summarize(&self, budget: &CategoryBudget, month: BudgetMonth) -> CategorySummary {
        let spent = self.spent_in_category(budget, month);
        let limit = self.budget_for_category(budget, month);
        let remaining = limit.checked_sub(spent).unwrap_or_else(|| {
            log::warn!("Remaining budget for {} overflowed", budget.category_id);
            Money::zero()
        });
        let progress = if limit.is_zero() {
            0.0
        } else {
            spent.ratio_of(limit).clamp(0.0, 1.0)
        };

        CategorySummary {
            category_id: budget.category_id.clone(),
            name: budget.name.clone(),
            icon: budget.icon.clone(),
            spent,
            budget: limit,
            remaining,
            progress,
            over_budget: spent > limit,
            has_override: budget.override_for(month).is_some(),
        }
    }

    /// Full roll-up for `month`
    pub fn overview(&self, month: BudgetMonth) -> BudgetOverview {
        let mut visible: Vec<&CategoryBudget> = self.visible().collect();
        visible.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));

        BudgetOverview {
            month,
            income: self.income(month),
            total_spent: self.total_spent(month),
            total_budget: self.total_budget(month),
            free_cash_flow: self.free_cash_flow(month),
            categories: visible.into_iter().map(|b| self.summarize(b, month)).collect(),
        }
    }

    fn visible(&self) -> impl Iterator<Item = &'a CategoryBudget> + 'a {
        self.budgets.iter().filter(|b| !b.hidden)
    }
}

/// Add a term to a running total; an overflowing term contributes zero
pub(crate) fn checked_total(acc: Money, term: Money, context: &str) -> Money {
    acc.checked_add(term).unwrap_or_else(|| {
        log::warn!("Amount overflow while totalling {}; term ignored", context);
        acc
    })
}

/// Roll up `transactions` against `budgets` for `month`
pub fn aggregate_budget(
    transactions: &[Transaction],
    budgets: &[CategoryBudget],
    income: &IncomePlan,
    month: BudgetMonth,
) -> BudgetOverview {
    BudgetAggregator::new(transactions, budgets, income).overview(month)
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Roll up stored data for `month`
    pub fn overview(&self, month: BudgetMonth) -> TallyResult<BudgetOverview> {
        let transactions = self.storage.transactions.get_all()?;
        let budgets = self.storage.budgets.get_all()?;
        let income = self.storage.budgets.income()?;
        Ok(aggregate_budget(&transactions, &budgets, &income, month))
    }

    /// Find a budget line by identifier or name
    ///
    /// Matches the stored id or name first, then a short spelling such as
    /// "food" for the built-in categories.
    pub fn find(&self, identifier: &str) -> TallyResult<CategoryBudget> {
        if let Some(budget) = self.storage.budgets.get(identifier)? {
            return Ok(budget);
        }

        let alias = match identifier.parse::<Category>() {
            Ok(category) => self.storage.budgets.get(category.id())?,
            Err(_) => None,
        };
        alias.ok_or_else(|| TallyError::category_not_found(identifier))
    }

    /// Set a category's limit, either standing or for one month
    pub fn set_limit(
        &self,
        identifier: &str,
        limit: Money,
        month: Option<BudgetMonth>,
    ) -> TallyResult<CategoryBudget> {
        let mut budget = self.find(identifier)?;
        let before = budget.clone();

        match month {
            Some(month) => budget.set_override(month, limit),
            None => budget.set_limit(limit),
        }

        self.save_budget(before, budget)
    }

    /// Drop a category's override for `month`
    pub fn clear_override(&self, identifier: &str, month: BudgetMonth) -> TallyResult<CategoryBudget> {
        let mut budget = self.find(identifier)?;
        let before = budget.clone();

        if !budget.clear_override(month) {
            return Err(TallyError::NotFound {
                entity_type: "Limit override",
                identifier: format!("{} {}", budget.name, month),
            });
        }

        self.save_budget(before, budget)
    }

    /// Hide or show a category; hidden categories drop out of totals
    pub fn set_hidden(&self, identifier: &str, hidden: bool) -> TallyResult<CategoryBudget> {
        let mut budget = self.find(identifier)?;
        let before = budget.clone();
        budget.set_hidden(hidden);
        self.save_budget(before, budget)
    }

    /// Add a custom budget line after the existing ones
    pub fn add_category(&self, name: &str, limit: Money) -> TallyResult<CategoryBudget> {
        let name = name.trim();
        if self.storage.budgets.get(name)?.is_some() {
            return Err(TallyError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let next_order = self
            .storage
            .budgets
            .get_all()?
            .iter()
            .map(|b| b.sort_order)
            .max()
            .map_or(0, |max| max + 1);

        let mut budget = CategoryBudget::new(name, name, limit);
        budget.sort_order = next_order;
        budget
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::CategoryBudget,
            budget.category_id.clone(),
            Some(budget.name.clone()),
            &budget,
        )?;

        log::info!("Added category {} with limit {}", budget.name, budget.limit);
        Ok(budget)
    }

    /// Set planned income, either standing or for one month
    pub fn set_income(&self, amount: Money, month: Option<BudgetMonth>) -> TallyResult<IncomePlan> {
        if amount.is_negative() {
            return Err(TallyError::Validation("Income cannot be negative".into()));
        }

        let before = self.storage.budgets.income()?;
        let mut income = before.clone();
        match month {
            Some(month) => income.set_for_month(month, amount),
            None => income.standing = amount,
        }

        self.storage.budgets.set_income(income.clone())?;
        self.storage.budgets.save()?;

        self.storage
            .log_update(EntityType::IncomePlan, "income", None, &before, &income)?;

        Ok(income)
    }

    fn save_budget(&self, before: CategoryBudget, after: CategoryBudget) -> TallyResult<CategoryBudget> {
        after
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(after.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::CategoryBudget,
            after.category_id.clone(),
            Some(after.name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use crate::models::Category;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn month(y: i32, m: u32) -> BudgetMonth {
        BudgetMonth::new(y, m).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budgets() -> Vec<CategoryBudget> {
        vec![
            CategoryBudget::for_category(Category::FoodAndDrink, 0),
            CategoryBudget::for_category(Category::Transport, 1),
        ]
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::expense("Starbucks", date(2025, 1, 5), Money::from_dollars(50), Category::FoodAndDrink),
            Transaction::expense("Kroger", date(2025, 1, 20), Money::from_dollars(150), Category::FoodAndDrink),
            Transaction::expense("Uber", date(2025, 1, 9), Money::from_dollars(30), Category::Transport),
            // Different month
            Transaction::expense("Chipotle", date(2025, 2, 1), Money::from_dollars(12), Category::FoodAndDrink),
            // Income never counts as spending
            Transaction::income("Employer", date(2025, 1, 1), Money::from_dollars(4000), Category::Salary),
        ]
    }

    #[test]
    fn test_spent_in_category() {
        let txns = transactions();
        let budgets = budgets();
        let income = IncomePlan::default();
        let agg = BudgetAggregator::new(&txns, &budgets, &income);

        assert_eq!(agg.spent_in_category(&budgets[0], month(2025, 1)), Money::from_dollars(200));
        assert_eq!(agg.spent_in_category(&budgets[1], month(2025, 1)), Money::from_dollars(30));
        assert_eq!(agg.spent_in_category(&budgets[0], month(2025, 2)), Money::from_dollars(12));
    }

    #[test]
    fn test_overview_totals() {
        let txns = transactions();
        let budgets = budgets();
        let income = IncomePlan::new(Money::from_dollars(3000));

        let overview = aggregate_budget(&txns, &budgets, &income, month(2025, 1));

        assert_eq!(overview.total_spent, Money::from_dollars(230));
        assert_eq!(overview.total_budget, Money::from_dollars(900));
        assert_eq!(overview.income, Money::from_dollars(3000));
        assert_eq!(overview.free_cash_flow, Money::from_dollars(2100));
        assert_eq!(overview.remaining(), Money::from_dollars(670));
        assert_eq!(overview.categories.len(), 2);

        let spent_sum: Money = overview.categories.iter().map(|c| c.spent).sum();
        assert_eq!(spent_sum, overview.total_spent);
    }

    #[test]
    fn test_override_preferred() {
        let txns = transactions();
        let mut budgets = budgets();
        budgets[0].set_override(month(2025, 1), Money::from_dollars(100));
        let income = IncomePlan::default();
        let agg = BudgetAggregator::new(&txns, &budgets, &income);

        assert_eq!(agg.budget_for_category(&budgets[0], month(2025, 1)), Money::from_dollars(100));
        assert_eq!(agg.budget_for_category(&budgets[0], month(2025, 2)), Money::from_dollars(600));

        let summary = agg.summarize(&budgets[0], month(2025, 1));
        assert!(summary.has_override);
        assert!(summary.over_budget);
        assert_eq!(summary.progress, 1.0);
        assert_eq!(summary.remaining, Money::from_dollars(-100));
    }

    #[test]
    fn test_hidden_categories_excluded() {
        let txns = transactions();
        let mut budgets = budgets();
        budgets[1].hidden = true;
        let income = IncomePlan::default();

        let overview = aggregate_budget(&txns, &budgets, &income, month(2025, 1));

        assert_eq!(overview.total_budget, Money::from_dollars(600));
        assert_eq!(overview.total_spent, Money::from_dollars(200));
        assert_eq!(overview.categories.len(), 1);
    }

    #[test]
    fn test_zero_budget_progress() {
        let txns = transactions();
        let budgets = vec![CategoryBudget::new("Food & Drink", "Food & Drink", Money::zero())];
        let income = IncomePlan::default();
        let agg = BudgetAggregator::new(&txns, &budgets, &income);

        let summary = agg.summarize(&budgets[0], month(2025, 1));
        assert_eq!(summary.progress, 0.0);
        assert!(summary.over_budget);
    }

    #[test]
    fn test_income_override_and_negative_cash_flow() {
        let budgets = budgets();
        let mut income = IncomePlan::new(Money::from_dollars(500));
        income.set_for_month(month(2025, 3), Money::from_dollars(2000));

        let march = aggregate_budget(&[], &budgets, &income, month(2025, 3));
        assert_eq!(march.free_cash_flow, Money::from_dollars(1100));

        let april = aggregate_budget(&[], &budgets, &income, month(2025, 4));
        assert_eq!(april.free_cash_flow, Money::from_dollars(-400));
    }

    #[test]
    fn test_overflow_term_contributes_zero() {
        let txns = vec![
            Transaction::expense("Big", date(2025, 1, 1), Money::from_cents(i64::MAX), Category::FoodAndDrink),
            Transaction::expense("Small", date(2025, 1, 2), Money::from_cents(100), Category::FoodAndDrink),
        ];
        let budgets = budgets();
        let income = IncomePlan::default();
        let agg = BudgetAggregator::new(&txns, &budgets, &income);

        assert_eq!(agg.spent_in_category(&budgets[0], month(2025, 1)), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let txns = transactions();
        let budgets = budgets();
        let income = IncomePlan::new(Money::from_dollars(3000));

        let first = aggregate_budget(&txns, &budgets, &income, month(2025, 1));
        let second = aggregate_budget(&txns, &budgets, &income, month(2025, 1));
        assert_eq!(first, second);
    }

    #[test]
    fn test_top_category() {
        let txns = transactions();
        let budgets = budgets();
        let income = IncomePlan::default();

        let overview = aggregate_budget(&txns, &budgets, &income, month(2025, 1));
        assert_eq!(overview.top_category().unwrap().name, "Food & Drink");

        let empty = aggregate_budget(&[], &budgets, &income, month(2025, 1));
        assert!(empty.top_category().is_none());
    }

    fn create_service_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        crate::storage::initialize_storage(&paths, &crate::config::Settings::default()).unwrap();
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_service_set_limit_and_override() {
        let (_temp, storage) = create_service_storage();
        let service = BudgetService::new(&storage);
        let jan = month(2025, 1);

        service.set_limit("bills", Money::from_dollars(1000), None).unwrap();
        let bills = service
            .set_limit("Bills", Money::from_dollars(800), Some(jan))
            .unwrap();

        assert_eq!(bills.limit, Money::from_dollars(1000));
        assert_eq!(bills.limit_for(jan), Money::from_dollars(800));

        let cleared = service.clear_override("Bills", jan).unwrap();
        assert_eq!(cleared.limit_for(jan), Money::from_dollars(1000));
        assert!(service.clear_override("Bills", jan).unwrap_err().is_not_found());

        assert_eq!(storage.audit().read_all().unwrap().len(), 3);
    }

    #[test]
    fn test_service_rejects_negative_limit() {
        let (_temp, storage) = create_service_storage();
        let service = BudgetService::new(&storage);

        let err = service
            .set_limit("Bills", Money::from_cents(-1), None)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.find("Bills").unwrap().limit, Money::from_dollars(1200));
    }

    #[test]
    fn test_service_add_category() {
        let (_temp, storage) = create_service_storage();
        let service = BudgetService::new(&storage);

        let pets = service.add_category("Pets", Money::from_dollars(80)).unwrap();
        assert_eq!(pets.sort_order, Category::all().len() as i32);

        let err = service.add_category("pets", Money::from_dollars(10)).unwrap_err();
        assert!(matches!(err, TallyError::Duplicate { .. }));
    }

    #[test]
    fn test_service_hide_and_income() {
        let (_temp, storage) = create_service_storage();
        let service = BudgetService::new(&storage);
        let jan = month(2025, 1);

        let before = service.overview(jan).unwrap();
        service.set_hidden("Bills", true).unwrap();
        let after = service.overview(jan).unwrap();
        assert_eq!(before.total_budget - after.total_budget, Money::from_dollars(1200));

        service.set_income(Money::from_dollars(5000), None).unwrap();
        service.set_income(Money::from_dollars(6000), Some(jan)).unwrap();
        assert_eq!(service.overview(jan).unwrap().income, Money::from_dollars(6000));
        assert_eq!(service.overview(month(2025, 2)).unwrap().income, Money::from_dollars(5000));

        assert!(service.set_income(Money::from_cents(-1), None).unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_category() {
        let (_temp, storage) = create_service_storage();
        let service = BudgetService::new(&storage);

        let err = service.set_hidden("Groceries", true).unwrap_err();
        assert!(err.is_not_found());
    }
}
