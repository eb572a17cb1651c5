//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::{parse_date, parse_month, today};
use crate::display::format_percentage;
use crate::error::{TallyError, TallyResult};
use crate::reports::SpendingReport;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending by category with an income/expense summary
    Spending {
        /// Month to report on (alternative to start/end)
        #[arg(short, long, conflicts_with_all = ["start", "end"])]
        month: Option<String>,

        /// Start date (YYYY-MM-DD, default start of this month)
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        end: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> TallyResult<()> {
    match cmd {
        ReportCommands::Spending {
            month,
            start,
            end,
            output,
            top,
        } => handle_spending_report(storage, month, start, end, output, top),
    }
}

fn handle_spending_report(
    storage: &Storage,
    month: Option<String>,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
    top: Option<usize>,
) -> TallyResult<()> {
    let (start_date, end_date) = if let Some(m) = month {
        let month = parse_month(Some(&m))?;
        (month.start_date(), month.end_date())
    } else {
        let start_date = match start {
            Some(s) => parse_date(Some(&s))?,
            None => parse_month(None)?.start_date(),
        };
        let end_date = match end {
            Some(e) => parse_date(Some(&e))?,
            None => today(),
        };
        (start_date, end_date)
    };

    if start_date > end_date {
        return Err(TallyError::Validation(format!(
            "Start date {} is after end date {}",
            start_date, end_date
        )));
    }

    let report = SpendingReport::generate(storage, start_date, end_date)?;

    if let Some(path) = output {
        let file = File::create(&path).map_err(|e| {
            TallyError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        report.export_csv(BufWriter::new(file))?;
        println!("Spending report exported to: {}", path.display());
    } else if let Some(n) = top {
        println!("Top {} Spending Categories: {} to {}\n", n, start_date, end_date);
        println!("{:<25} {:>12} {:>8}", "Category", "Amount", "%");
        println!("{}", "-".repeat(47));

        for row in report.top_categories(n) {
            println!(
                "{:<25} {:>12} {:>8}",
                row.category.name(),
                row.total_spending.to_string(),
                format_percentage(row.percentage)
            );
        }
        println!("\nTotal Spending: {}", report.total_spending);
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}
