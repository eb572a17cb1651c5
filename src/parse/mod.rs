//! Text parsers that turn captured text into transaction candidates
//!
//! Two front ends feed the ledger: OCR lines from a receipt photo and a
//! single voice transcription. Both produce a `ParsedCandidate` that the
//! caller confirms before it becomes a `Transaction`. Failing to find an
//! amount is the only failure; merchant and category are best-effort
//! guesses with fixed fallbacks.

pub mod patterns;
pub mod receipt;
pub mod voice;

use thiserror::Error;

use crate::models::ParsedCandidate;

pub use receipt::ReceiptParser;
pub use voice::VoiceParser;

/// Recoverable parser failures; the caller should ask for new input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Could not find amount on receipt")]
    AmountNotFound,

    #[error("Could not understand amount. Try: \"I spent 15 dollars at Starbucks\"")]
    AmountNotUnderstood,

    #[error("Nothing to parse")]
    EmptyInput,
}

/// Parse receipt OCR lines with a freshly built parser
pub fn parse_receipt<S: AsRef<str>>(lines: &[S]) -> crate::error::TallyResult<ParsedCandidate> {
    Ok(ReceiptParser::new()?.parse(lines)?)
}

/// Parse a voice transcription with a freshly built parser
pub fn parse_voice(text: &str) -> crate::error::TallyResult<ParsedCandidate> {
    Ok(VoiceParser::new()?.parse(text)?)
}

/// Capitalise the first letter of every word and lowercase the rest
///
/// A word starts after any character that is neither alphanumeric nor an
/// apostrophe, so "chick-fil-a" becomes "Chick-Fil-A" and "joe's" stays
/// "Joe's".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !(c.is_alphanumeric() || c == '\'');
    }
    out
}
