//! Savings goal display formatting

use super::report::{fit, format_bar, separator};
use crate::config::Settings;
use crate::models::FinancialGoal;

const BAR_WIDTH: usize = 12;

pub fn format_goal_list(goals: &[FinancialGoal], settings: &Settings) -> String {
    if goals.is_empty() {
        return "No goals yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14} {:<20} {:>11} {:>11} {:<12} {:>4} {}\n",
        "ID", "Goal", "Saved", "Target", "Progress", "", "ETA"
    ));
    output.push_str(&separator(90));
    output.push('\n');

    for goal in goals {
        let eta = match goal.months_to_target() {
            Some(0) => "done".to_string(),
            Some(1) => "1 month".to_string(),
            Some(n) => format!("{} months", n),
            None => "-".to_string(),
        };
        output.push_str(&format!(
            "{:<14} {} {:>11} {:>11} {} {:>3}% {}\n",
            goal.id.to_string(),
            fit(&goal.title, 20),
            settings.format_money(goal.current),
            settings.format_money(goal.target),
            format_bar(goal.progress(), BAR_WIDTH),
            (goal.progress() * 100.0) as u32,
            eta
        ));
    }

    output
}
