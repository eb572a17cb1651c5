//! Spending Report
//!
//! Spending by category, plus an income/expense summary, for a date range.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::error::TallyResult;
use crate::models::{BudgetMonth, Category, Money};
use crate::services::budget::checked_total;
use crate::storage::Storage;

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingByCategory {
    pub category: Category,
    /// Total spending (absolute value)
    pub total_spending: Money,
    pub transaction_count: usize,
    /// Percentage of total spending
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Categories with spending, largest first
    pub categories: Vec<SpendingByCategory>,
    /// Total expenses (absolute value)
    pub total_spending: Money,
    pub total_income: Money,
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Generate a spending report for a date range (inclusive)
    pub fn generate(storage: &Storage, start_date: NaiveDate, end_date: NaiveDate) -> TallyResult<Self> {
        let transactions = storage.transactions.get_by_date_range(start_date, end_date)?;

        let mut by_category: HashMap<Category, (Money, usize)> = HashMap::new();
        let mut total_income = Money::zero();
        let mut total_spending = Money::zero();

        for txn in &transactions {
            let amount = txn.amount.abs();
            if txn.is_income() {
                total_income = checked_total(total_income, amount, "report income");
            } else {
                let entry = by_category
                    .entry(txn.category)
                    .or_insert((Money::zero(), 0));
                entry.0 = checked_total(entry.0, amount, txn.category.name());
                entry.1 += 1;
                total_spending = checked_total(total_spending, amount, "report spending");
            }
        }

        let mut categories: Vec<SpendingByCategory> = by_category
            .into_iter()
            .filter(|(_, (spending, _))| !spending.is_zero())
            .map(|(category, (spending, count))| SpendingByCategory {
                category,
                total_spending: spending,
                transaction_count: count,
                percentage: spending.ratio_of(total_spending) * 100.0,
            })
            .collect();

        // Most spending first; ties in display order
        let order = |c: &Category| Category::all().iter().position(|x| x == c);
        categories.sort_by(|a, b| {
            b.total_spending
                .cmp(&a.total_spending)
                .then_with(|| order(&a.category).cmp(&order(&b.category)))
        });

        Ok(Self {
            start_date,
            end_date,
            categories,
            total_spending,
            total_income,
            total_transactions: transactions.len(),
        })
    }

    /// Generate a report covering one calendar month
    pub fn for_month(storage: &Storage, month: BudgetMonth) -> TallyResult<Self> {
        Self::generate(storage, month.start_date(), month.end_date())
    }

    /// Income minus expenses
    pub fn balance(&self) -> Money {
        self.total_income - self.total_spending
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Income:       {}\n", self.total_income));
        output.push_str(&format!("Total Spending:     {}\n", self.total_spending));
        output.push_str(&format!("Balance:            {}\n", self.balance()));
        output.push_str(&format!("Transactions:       {}\n\n", self.total_transactions));

        if self.categories.is_empty() {
            output.push_str("No spending in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<25} {:>12} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<25} {:>12} {:>8} {:>7.1}%\n",
                row.category.name(),
                row.total_spending.to_string(),
                row.transaction_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<25} {:>12}\n",
            "TOTAL SPENDING",
            self.total_spending.to_string()
        ));

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TallyResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "Start Date",
            "End Date",
            "Category",
            "Amount",
            "Transaction Count",
            "Percentage",
        ])?;

        let start = self.start_date.to_string();
        let end = self.end_date.to_string();
        for row in &self.categories {
            csv.write_record([
                start.as_str(),
                end.as_str(),
                row.category.name(),
                row.total_spending.to_decimal_string().as_str(),
                row.transaction_count.to_string().as_str(),
                format!("{:.2}", row.percentage).as_str(),
            ])?;
        }

        csv.write_record([
            start.as_str(),
            end.as_str(),
            "TOTAL",
            self.total_spending.to_decimal_string().as_str(),
            self.total_transactions.to_string().as_str(),
            "100.00",
        ])?;

        csv.flush()?;
        Ok(())
    }

    /// Top spending categories
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
