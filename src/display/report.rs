//! Formatting helpers shared by the terminal views

use crate::services::{InsightLevel, SpendingInsight};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Progress bar for a ratio in `[0, 1]`
pub fn format_bar(ratio: f64, width: usize) -> String {
    if ratio <= 0.0 || !ratio.is_finite() {
        return "░".repeat(width);
    }

    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to at most `max_len` characters, with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Truncate then left-align in a field of `width` characters
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}

/// One-line rendering of a spending insight with a level marker
pub fn format_insight(insight: &SpendingInsight) -> String {
    let marker = match insight.level {
        InsightLevel::Warning => "[!]",
        InsightLevel::Elevated => "[~]",
        InsightLevel::NoSpending => "[ ]",
        InsightLevel::OnTrack => "[ok]",
    };
    format!("{} {}", marker, insight.message)
}
