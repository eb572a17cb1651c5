//! CSV Export functionality
//!
//! Exports transactions to a spreadsheet-friendly CSV file.

use std::io::Write;

use crate::error::TallyResult;
use crate::models::Transaction;
use crate::storage::Storage;

/// Column header written before the rows
pub const TRANSACTION_HEADER: [&str; 5] = ["Date", "Merchant", "Amount", "Type", "Category"];

/// Export all stored transactions, newest first
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> TallyResult<usize> {
    let transactions = storage.transactions.get_all()?;
    write_transactions_csv(&transactions, writer)?;
    Ok(transactions.len())
}

/// Write `transactions` as CSV
///
/// Amounts are signed decimals without a currency symbol: expenses are
/// negative.
pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> TallyResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRANSACTION_HEADER)?;

    for txn in transactions {
        csv.write_record([
            txn.date.format("%Y-%m-%d").to_string().as_str(),
            txn.merchant.as_str(),
            txn.amount.to_decimal_string().as_str(),
            txn.kind.to_string().as_str(),
            txn.category.name(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
