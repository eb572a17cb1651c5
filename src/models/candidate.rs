//! Parser output awaiting confirmation

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// Which parser produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Receipt,
    Voice,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Receipt => write!(f, "receipt"),
            Self::Voice => write!(f, "voice"),
        }
    }
}

/// An unconfirmed transaction guess built from captured text
///
/// A candidate always carries a positive amount; input without one never
/// produces a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCandidate {
    /// Best-effort merchant name
    pub merchant: String,

    /// Positive amount
    pub amount: Money,

    /// Best-effort category, `Other` when nothing matched
    pub category: Category,

    pub source: CandidateSource,

    /// The text the candidate was derived from
    #[serde(default)]
    pub raw_text: String,
}

impl ParsedCandidate {
    pub fn new(
        merchant: impl Into<String>,
        amount: Money,
        category: Category,
        source: CandidateSource,
    ) -> Self {
        Self {
            merchant: merchant.into(),
            amount,
            category,
            source,
            raw_text: String::new(),
        }
    }

    /// Keep the source text alongside the guess
    pub fn with_raw_text(mut self, raw: impl Into<String>) -> Self {
        self.raw_text = raw.into();
        self
    }
}

impl fmt::Display for ParsedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.merchant, self.amount, self.category)
    }
}
