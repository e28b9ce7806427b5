//! Tolerant readers for loosely-typed backend JSON.
//!
//! The vendor API mixes numbers, numeric strings ("12.5", "$1.2B", "8.1%")
//! and nulls for the same field depending on which upstream source filled it.
//! Every reader here returns `None` instead of failing, so callers can fall
//! through to the next source or to a default.

use serde::Deserialize;
use serde_json::Value;

/// Walk a nested object by keys
pub fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Read a finite number from a JSON number or a numeric string
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number_str(s),
        _ => None,
    }
}

pub fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    value_at(value, path).and_then(number)
}

/// Non-blank string; numbers are accepted and rendered as text
pub fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    match value_at(value, path)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric array; non-numeric entries are skipped
pub fn numbers_at(value: &Value, path: &[&str]) -> Vec<f64> {
    match value_at(value, path) {
        Some(Value::Array(items)) => items.iter().filter_map(number).collect(),
        _ => Vec::new(),
    }
}

/// Parse strings like "1234.5", "$12.3B", "(5.0%)", "1,200", "None"
pub fn parse_number_str(raw: &str) -> Option<f64> {
    let mut s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if matches!(
        s.to_ascii_lowercase().as_str(),
        "none" | "null" | "n/a" | "na" | "-" | "nan"
    ) {
        return None;
    }

    let mut negative = false;
    if s.starts_with('(') && s.ends_with(')') && s.len() > 2 {
        negative = true;
        s = &s[1..s.len() - 1];
    }

    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' ' | '\u{00a0}'))
        .collect();

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('K') | Some('k') => (&cleaned[..cleaned.len() - 1], 1e3),
        Some('M') | Some('m') => (&cleaned[..cleaned.len() - 1], 1e6),
        Some('B') | Some('b') => (&cleaned[..cleaned.len() - 1], 1e9),
        Some('T') | Some('t') => (&cleaned[..cleaned.len() - 1], 1e12),
        _ => (cleaned.as_str(), 1.0),
    };

    let parsed = digits.parse::<f64>().ok()? * multiplier;
    let signed = if negative { -parsed } else { parsed };
    if signed.is_finite() {
        Some(signed)
    } else {
        None
    }
}

// ============================================================================
// serde adapters
// ============================================================================

/// `deserialize_with` adapter: any number-like value, else 0.0
pub fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value).unwrap_or(0.0))
}

/// `deserialize_with` adapter: non-negative count, rounded, else 0
pub fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
        .unwrap_or(0))
}

/// `deserialize_with` adapter: JSON bool, or "true"/"false"/1/0
pub fn de_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

/// `deserialize_with` adapter: string, number rendered as text, else empty
pub fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// `deserialize_with` adapter: array of strings; other entries are dropped
pub fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_number_str_variants() {
        assert_eq!(parse_number_str("12.5"), Some(12.5));
        assert_eq!(parse_number_str("8.1%"), Some(8.1));
        assert_eq!(parse_number_str("$2B"), Some(2e9));
        assert_eq!(parse_number_str("1,200"), Some(1200.0));
        assert_eq!(parse_number_str("(5.0%)"), Some(-5.0));
        assert_eq!(parse_number_str("None"), None);
        assert_eq!(parse_number_str("N/A"), None);
        assert_eq!(parse_number_str("abc"), None);
        assert_eq!(parse_number_str(""), None);
    }

    #[test]
    fn test_number_rejects_non_numeric_json() {
        assert_eq!(number(&json!(true)), None);
        assert_eq!(number(&json!(null)), None);
        assert_eq!(number(&json!([1, 2])), None);
        assert_eq!(number(&json!(3)), Some(3.0));
    }

    #[test]
    fn test_nested_access() {
        let v = json!({"financialRatios": {"current_ratio": "1.4", "cash_ratio": null}});
        assert_eq!(number_at(&v, &["financialRatios", "current_ratio"]), Some(1.4));
        assert_eq!(number_at(&v, &["financialRatios", "cash_ratio"]), None);
        assert_eq!(number_at(&v, &["financialRatios", "missing"]), None);
        assert_eq!(number_at(&v, &["nope", "current_ratio"]), None);
    }

    #[test]
    fn test_string_at_skips_blank() {
        let v = json!({"name": "  ", "symbol": "TEL", "id": 7});
        assert_eq!(string_at(&v, &["name"]), None);
        assert_eq!(string_at(&v, &["symbol"]).as_deref(), Some("TEL"));
        assert_eq!(string_at(&v, &["id"]).as_deref(), Some("7"));
    }

    #[test]
    fn test_numbers_at_skips_garbage() {
        let v = json!({"q": [1.5, "2.5", null, "x", 4]});
        assert_eq!(numbers_at(&v, &["q"]), vec![1.5, 2.5, 4.0]);
        assert!(numbers_at(&v, &["missing"]).is_empty());
    }
}
