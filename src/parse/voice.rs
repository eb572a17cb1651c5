//! Voice phrase parser
//!
//! Understands short spoken phrases such as "I spent 15 dollars at
//! Starbucks" or "25 bucks on lunch".

use regex::Regex;

use super::patterns::{categorize, VOICE_KEYWORDS};
use super::{title_case, ParseError};
use crate::error::TallyResult;
use crate::models::{CandidateSource, Money, ParsedCandidate};

/// Merchant name used when the phrase names no place
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Tried in order; the first pattern that matches anywhere wins
const AMOUNT_PATTERNS: [&str; 4] = [
    r"(?i)(\d+(?:\.\d{1,2})?)\s*(?:dollars?|bucks?|\$)",
    r"(?i)\$\s*(\d+(?:\.\d{1,2})?)",
    r"(?i)spent\s*(\d+(?:\.\d{1,2})?)",
    r"(?i)(\d+(?:\.\d{1,2})?)\s*(?:on|at|for)",
];

const MERCHANT_MARKERS: [&str; 2] = [" at ", " on "];

const MERCHANT_WORDS: usize = 3;

/// Parser for voice transcriptions
#[derive(Debug, Clone)]
pub struct VoiceParser {
    amount_patterns: Vec<Regex>,
}

impl VoiceParser {
    /// Compile the amount patterns
    pub fn new() -> TallyResult<Self> {
        let amount_patterns = AMOUNT_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { amount_patterns })
    }

    /// Turn a transcription into a candidate
    pub fn parse(&self, text: &str) -> Result<ParsedCandidate, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let lower = text.to_lowercase();

        let amount = self
            .find_amount(&lower)
            .filter(|a| a.is_positive())
            .ok_or(ParseError::AmountNotUnderstood)?;

        let merchant = find_merchant(&lower).unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());
        let category = categorize(VOICE_KEYWORDS, &lower);

        log::debug!(
            "Parsed voice input: merchant={}, amount={}, category={}",
            merchant,
            amount,
            category
        );

        Ok(ParsedCandidate::new(merchant, amount, category, CandidateSource::Voice)
            .with_raw_text(text))
    }

    fn find_amount(&self, text: &str) -> Option<Money> {
        let digits = self
            .amount_patterns
            .iter()
            .find_map(|re| re.captures(text).and_then(|caps| caps.get(1)))?;
        Money::parse(digits.as_str()).ok()
    }
}

/// Up to three words after the first " at ", else the first " on "
fn find_merchant(text: &str) -> Option<String> {
    let (_, rest) = MERCHANT_MARKERS
        .iter()
        .find_map(|marker| text.split_once(marker))?;

    let words: Vec<&str> = rest.split_whitespace().take(MERCHANT_WORDS).collect();
    if words.is_empty() {
        return None;
    }
    Some(title_case(&words.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn parser() -> VoiceParser {
        VoiceParser::new().unwrap()
    }

    #[test]
    fn test_dollars_at_merchant() {
        let candidate = parser().parse("I spent 15 dollars at Starbucks").unwrap();
        assert_eq!(candidate.amount, Money::from_dollars(15));
        assert_eq!(candidate.merchant, "Starbucks");
        // No voice keyword mentions starbucks
        assert_eq!(candidate.category, Category::Other);
        assert_eq!(candidate.source, CandidateSource::Voice);
    }

    #[test]
    fn test_bucks_on_lunch() {
        let candidate = parser().parse("25 bucks on lunch").unwrap();
        assert_eq!(candidate.amount, Money::from_dollars(25));
        assert_eq!(candidate.merchant, "Lunch");
        assert_eq!(candidate.category, Category::FoodAndDrink);
    }

    #[test]
    fn test_dollar_sign() {
        let candidate = parser().parse("paid $7.50 at the corner cafe today").unwrap();
        assert_eq!(candidate.amount, Money::from_cents(750));
        assert_eq!(candidate.merchant, "The Corner Cafe");
    }

    #[test]
    fn test_spent_pattern() {
        let candidate = parser().parse("spent 42.1").unwrap();
        assert_eq!(candidate.amount, Money::from_cents(4210));
        assert_eq!(candidate.merchant, UNKNOWN_MERCHANT);
    }

    #[test]
    fn test_pattern_order() {
        // "for" pattern would pick 3; the dollars pattern is tried first
        let candidate = parser().parse("3 for 12 dollars").unwrap();
        assert_eq!(candidate.amount, Money::from_dollars(12));
    }

    #[test]
    fn test_at_preferred_over_on() {
        let candidate = parser().parse("20 dollars on gas at shell station").unwrap();
        assert_eq!(candidate.merchant, "Shell Station");
        assert_eq!(candidate.category, Category::Transport);
    }

    #[test]
    fn test_marker_with_nothing_after() {
        let candidate = parser().parse("10 dollars at ").unwrap();
        assert_eq!(candidate.merchant, UNKNOWN_MERCHANT);
    }

    #[test]
    fn test_first_keyword_group_wins() {
        // food (lunch) and transport (uber) both match
        let candidate = parser().parse("12 dollars on uber for lunch").unwrap();
        assert_eq!(candidate.category, Category::FoodAndDrink);
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(
            parser().parse("bought a coffee"),
            Err(ParseError::AmountNotUnderstood)
        );
        assert_eq!(
            parser().parse("0 dollars at home"),
            Err(ParseError::AmountNotUnderstood)
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parser().parse(""), Err(ParseError::EmptyInput));
        assert_eq!(parser().parse("  \n"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_raw_text_kept() {
        let candidate = parser().parse("5 bucks at Subway").unwrap();
        assert_eq!(candidate.raw_text, "5 bucks at Subway");
    }
}
