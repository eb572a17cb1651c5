//! Receipt text parser
//!
//! Works on the lines an OCR engine recognised on a receipt photo. The
//! merchant comes from the known-merchant table or the first plausible
//! header line; the amount is the largest currency-shaped number anywhere
//! on the receipt, which is usually the total.

use regex::Regex;

use super::patterns::{categorize, find_merchant, RECEIPT_KEYWORDS};
use super::{title_case, ParseError};
use crate::error::TallyResult;
use crate::models::{CandidateSource, Category, Money, ParsedCandidate};

/// Merchant name used when no line looks like a store name
pub const UNKNOWN_STORE: &str = "Unknown Store";

const AMOUNT_PATTERN: &str =
    r"(?i)(?:total|amount|due|charge|subtotal)?[:\s]*\$?\s*(\d{1,6}[.,]\d{2})";

const DATE_PATTERN: &str = r"\d{1,2}/\d{1,2}/\d{2,4}|\d{1,2}-\d{1,2}-\d{2,4}|\d{4}-\d{2}-\d{2}";

/// Parser for receipt OCR output
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    amount_re: Regex,
    date_re: Regex,
}

impl ReceiptParser {
    /// Compile the receipt patterns
    pub fn new() -> TallyResult<Self> {
        Ok(Self {
            amount_re: Regex::new(AMOUNT_PATTERN)?,
            date_re: Regex::new(DATE_PATTERN)?,
        })
    }

    /// Turn OCR lines into a candidate
    ///
    /// Fails with `AmountNotFound` when no positive amount appears on any
    /// line. Merchant and category always have a value.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParsedCandidate, ParseError> {
        let haystack = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let amount = self
            .largest_amount(lines)
            .filter(|a| a.is_positive())
            .ok_or(ParseError::AmountNotFound)?;

        let (merchant, category) = match find_merchant(&haystack) {
            Some(known) => (known.name.to_string(), known.category),
            None => (
                self.header_merchant(lines)
                    .unwrap_or_else(|| UNKNOWN_STORE.to_string()),
                Category::Other,
            ),
        };

        let category = if category == Category::Other {
            categorize(RECEIPT_KEYWORDS, &haystack)
        } else {
            category
        };

        log::debug!(
            "Parsed receipt: merchant={}, amount={}, category={}",
            merchant,
            amount,
            category
        );

        let raw = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ParsedCandidate::new(merchant, amount, category, CandidateSource::Receipt).with_raw_text(raw))
    }

    /// Largest amount matched on any single line
    fn largest_amount<S: AsRef<str>>(&self, lines: &[S]) -> Option<Money> {
        lines
            .iter()
            .flat_map(|line| self.amount_re.captures_iter(line.as_ref()))
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| Money::parse(&m.as_str().replace(',', ".")).ok())
            .max()
    }

    /// First line that reads like a store name
    fn header_merchant<S: AsRef<str>>(&self, lines: &[S]) -> Option<String> {
        lines
            .iter()
            .map(|l| l.as_ref().trim())
            .find(|line| line.chars().count() > 3 && !line.contains('$') && !self.looks_like_date(line))
            .map(title_case)
    }

    /// Whether the text contains something date-shaped
    pub fn looks_like_date(&self, text: &str) -> bool {
        self.date_re.is_match(text)
    }
}
