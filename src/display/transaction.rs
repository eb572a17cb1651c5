//! Transaction display formatting
//!
//! Register views for stored transactions and a preview of a parser
//! candidate before it is saved.

use super::report::{fit, separator};
use crate::config::Settings;
use crate::models::{ParsedCandidate, Transaction};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    format!(
        "{:<13} {:<10} {} {:<14} {:>12}",
        txn.id.to_string(),
        settings.format_date(txn.date),
        fit(&txn.merchant, 22),
        txn.category.name(),
        settings.format_money(txn.amount)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13} {:<10} {:<22} {:<14} {:>12}\n",
        "ID", "Date", "Merchant", "Category", "Amount"
    ));
    output.push_str(&separator(75));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", settings.format_date(txn.date)));
    output.push_str(&format!("Merchant:    {}\n", txn.merchant));
    output.push_str(&format!("Amount:      {}\n", settings.format_money(txn.amount)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Source:      {}\n", txn.source));

    if !txn.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", txn.note));
    }

    output
}

/// Preview of what a scan or voice phrase was understood as
pub fn format_candidate(candidate: &ParsedCandidate, settings: &Settings) -> String {
    format!(
        "Merchant:    {}\nAmount:      {}\nCategory:    {}\n",
        candidate.merchant,
        settings.format_money(candidate.amount),
        candidate.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateSource, Category, Money};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction::expense(
            "Whole Foods Market Downtown Branch",
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_cents(8234),
            Category::FoodAndDrink,
        )
    }

    #[test]
    fn test_format_transaction_row() {
        let row = format_transaction_row(&sample(), &Settings::default());
        assert!(row.contains("2025-01-15"));
        assert!(row.contains("Whole Foods Market ..."));
        assert!(row.contains("-$82.34"));
        assert!(row.starts_with("txn-"));
    }

    #[test]
    fn test_format_empty_register() {
        let output = format_transaction_register(&[], &Settings::default());
        assert!(output.contains("No transactions"));
    }

    #[test]
    fn test_format_transaction_details() {
        let txn = sample().with_note("weekly shop");
        let output = format_transaction_details(&txn, &Settings::default());
        assert!(output.contains("Merchant:    Whole Foods Market Downtown Branch"));
        assert!(output.contains("Note:        weekly shop"));
        assert!(output.contains("Type:        Expense"));
    }

    #[test]
    fn test_format_candidate() {
        let candidate = ParsedCandidate::new("Starbucks", Money::from_cents(545), Category::FoodAndDrink, CandidateSource::Voice);
        let output = format_candidate(&candidate, &Settings::default());
        assert!(output.contains("Amount:      $5.45"));
        assert!(output.contains("Category:    Food & Drink"));
    }
}
