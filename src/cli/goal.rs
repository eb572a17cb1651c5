//! Savings goal CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display::format_goal_list;
use crate::error::TallyResult;
use crate::models::Money;
use crate::services::{CreateGoalInput, GoalService, UpdateGoalInput};
use crate::storage::Storage;

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal title
        title: String,
        /// Amount to reach
        target: String,
        /// Already saved
        #[arg(long, default_value = "0")]
        current: String,
        /// Planned monthly contribution
        #[arg(short, long, default_value = "0")]
        monthly: String,
        /// Palette colour index
        #[arg(long, default_value_t = 0)]
        color: u32,
    },

    /// List goals with progress
    List,

    /// Add money to a goal (negative to withdraw)
    #[command(allow_negative_numbers = true)]
    Contribute {
        /// Goal ID or title
        goal: String,
        /// Amount to add
        amount: String,
    },

    /// Change a goal's title, amounts or colour
    Edit {
        /// Goal ID or title
        goal: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        current: Option<String>,
        #[arg(short, long)]
        monthly: Option<String>,
        #[arg(long)]
        color: Option<u32>,
    },

    /// Delete a goal
    Delete {
        /// Goal ID or title
        goal: String,
    },
}

fn parse_optional(value: Option<String>) -> TallyResult<Option<Money>> {
    value.as_deref().map(parse_amount).transpose()
}

pub fn handle_goal_command(storage: &Storage, settings: &Settings, cmd: GoalCommands) -> TallyResult<()> {
    let service = GoalService::new(storage);

    match cmd {
        GoalCommands::Add {
            title,
            target,
            current,
            monthly,
            color,
        } => {
            let goal = service.add(CreateGoalInput {
                title,
                target: parse_amount(&target)?,
                current: parse_amount(&current)?,
                monthly_contribution: parse_amount(&monthly)?,
                color_index: color,
            })?;

            println!(
                "Created goal {} {} (target {})",
                goal.id,
                goal.title,
                settings.format_money(goal.target)
            );
        }

        GoalCommands::List => {
            let goals = service.list()?;
            print!("{}", format_goal_list(&goals, settings));
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = service.contribute(&goal, parse_amount(&amount)?)?;
            println!(
                "{}: {} of {} ({}%)",
                goal.title,
                settings.format_money(goal.current),
                settings.format_money(goal.target),
                (goal.progress() * 100.0) as u32
            );
            if goal.is_complete() {
                println!("Target reached!");
            }
        }

        GoalCommands::Edit {
            goal,
            title,
            target,
            current,
            monthly,
            color,
        } => {
            let goal = service.update(
                &goal,
                UpdateGoalInput {
                    title,
                    target: parse_optional(target)?,
                    current: parse_optional(current)?,
                    monthly_contribution: parse_optional(monthly)?,
                    color_index: color,
                },
            )?;
            println!("Updated goal {} {}", goal.id, goal.title);
        }

        GoalCommands::Delete { goal } => {
            let goal = service.delete(&goal)?;
            println!("Deleted goal {} {}", goal.id, goal.title);
        }
    }

    Ok(())
}
