//! Budget and recurring-template display formatting

use chrono::NaiveDate;

use super::report::{fit, format_bar, separator};
use crate::config::Settings;
use crate::models::{CategoryBudget, RecurringTransaction};
use crate::services::BudgetOverview;

const BAR_WIDTH: usize = 12;

/// Month overview: totals, then one row per visible category
pub fn format_budget_overview(overview: &BudgetOverview, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);
    let mut output = String::new();

    output.push_str(&format!("Budget for {}\n", overview.month.friendly()));
    output.push_str(&separator(78));
    output.push('\n');
    output.push_str(&format!("Income:          {:>12}\n", money(overview.income)));
    output.push_str(&format!("Budgeted:        {:>12}\n", money(overview.total_budget)));
    output.push_str(&format!("Spent:           {:>12}\n", money(overview.total_spent)));
    output.push_str(&format!("Remaining:       {:>12}\n", money(overview.remaining())));
    output.push_str(&format!("Free cash flow:  {:>12}\n\n", money(overview.free_cash_flow)));

    if overview.categories.is_empty() {
        output.push_str("No visible categories.\n");
        return output;
    }

    output.push_str(&format!(
        "{:<18} {:>11} {:>11} {:>11}  {}\n",
        "Category", "Spent", "Budget", "Left", "Progress"
    ));
    output.push_str(&separator(78));
    output.push('\n');

    for row in &overview.categories {
        let flag = if row.over_budget {
            " over"
        } else if row.has_override {
            " *"
        } else {
            ""
        };
        output.push_str(&format!(
            "{} {:>11} {:>11} {:>11}  {}{}\n",
            fit(&row.name, 18),
            money(row.spent),
            money(row.budget),
            money(row.remaining),
            format_bar(row.progress, BAR_WIDTH),
            flag
        ));
    }

    if overview.categories.iter().any(|c| c.has_override) {
        output.push_str("\n* limit overridden for this month\n");
    }

    output
}

/// All budget lines, hidden ones included
pub fn format_budget_lines(budgets: &[CategoryBudget], settings: &Settings) -> String {
    if budgets.is_empty() {
        return "No budget categories.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<18} {:>11}  {}\n", "Category", "Limit", "Overrides"));
    output.push_str(&separator(50));
    output.push('\n');

    for budget in budgets {
        let overrides = budget
            .overrides
            .iter()
            .map(|o| format!("{}={}", o.month, settings.format_money(o.limit)))
            .collect::<Vec<_>>()
            .join(", ");
        let hidden = if budget.hidden { " (hidden)" } else { "" };
        output.push_str(&format!(
            "{} {:>11}  {}{}\n",
            fit(&budget.name, 18),
            settings.format_money(budget.limit),
            overrides,
            hidden
        ));
    }

    output
}

/// Recurring templates with their next due date relative to `today`
pub fn format_recurring_list(
    templates: &[RecurringTransaction],
    today: NaiveDate,
    settings: &Settings,
) -> String {
    if templates.is_empty() {
        return "No recurring transactions.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13} {:<20} {:>11} {:<10} {:<10} {}\n",
        "ID", "Merchant", "Amount", "Every", "Next", "Due"
    ));
    output.push_str(&separator(78));
    output.push('\n');

    for rec in templates {
        let due = if !rec.active {
            "paused".to_string()
        } else {
            match rec.days_until_due(today) {
                d if d < 0 => format!("{} days overdue", -d),
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                d => format!("in {} days", d),
            }
        };
        output.push_str(&format!(
            "{:<13} {} {:>11} {:<10} {:<10} {}\n",
            rec.id.to_string(),
            fit(&rec.merchant, 20),
            settings.format_money(rec.amount),
            rec.frequency.to_string(),
            settings.format_date(rec.next_due),
            due
        ));
    }

    output
}
