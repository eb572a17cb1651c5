//! Human-readable change summaries for audit entries

use serde_json::Value;

/// Bookkeeping fields left out of change summaries
const IGNORED_FIELDS: [&str; 2] = ["updated_at", "created_at"];

const MAX_STRING_LEN: usize = 50;

/// Describe top-level field changes between two snapshots
///
/// Returns `None` when nothing but bookkeeping timestamps changed.
pub fn summarize_changes(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limit_change() {
        let before = json!({"name": "Bills", "limit": 120000, "updated_at": "a"});
        let after = json!({"name": "Bills", "limit": 100000, "updated_at": "b"});

        let diff = summarize_changes(&before, &after).unwrap();
        assert_eq!(diff, "limit: 120000 -> 100000");
    }

    #[test]
    fn test_only_timestamps_changed() {
        let before = json!({"hidden": false, "updated_at": "a"});
        let after = json!({"hidden": false, "updated_at": "b"});
        assert!(summarize_changes(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"note": "old"});
        let after = json!({"memo": "new"});

        let diff = summarize_changes(&before, &after).unwrap();
        assert!(diff.contains("note: \"old\" -> (removed)"));
        assert!(diff.contains("memo: (added) -> \"new\""));
    }

    #[test]
    fn test_array_summarised_by_length() {
        let before = json!({"overrides": []});
        let after = json!({"overrides": [{"month": "2025-01"}]});

        let diff = summarize_changes(&before, &after).unwrap();
        assert_eq!(diff, "overrides: [0 items] -> [1 items]");
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(80);
        let diff = summarize_changes(&json!(long), &json!("short")).unwrap();
        assert!(diff.starts_with(&format!("\"{}...\"", "x".repeat(47))));
    }
}
