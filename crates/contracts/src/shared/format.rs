//! Display formatting for vendor metrics.
//!
//! Negative values are parenthesized, accounting style, never prefixed
//! with a minus sign.

use super::lenient::parse_number_str;

pub const NOT_AVAILABLE: &str = "N/A";

/// `12.34` → `"12.3%"`, `-5.0` → `"(5.0%)"`
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let body = format!("{:.1}%", value.abs());
    wrap_negative(value, body)
}

/// Billions with one decimal: `12.34` → `"$12.3B"`
pub fn format_currency_billions(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let body = format!("${:.1}B", value.abs());
    wrap_negative(value, body)
}

/// Raw currency units shown in billions, e.g. balance sheet figures
pub fn format_raw_currency_as_billions(raw: f64) -> String {
    format_currency_billions(crate::domain::a001_vendor::aggregate::to_billions(raw))
}

/// Share price: `"$123.45"`
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let body = format!("${:.2}", value.abs());
    wrap_negative(value, body)
}

pub fn format_pe_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Optional balance-sheet ratio with two decimals
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Signed change with an arrow, e.g. `"▲ 4.2%"` / `"▼ (1.3%)"`
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => format!("▲ {}", format_percentage(v)),
        Some(v) if v.is_finite() && v < 0.0 => format!("▼ {}", format_percentage(v)),
        Some(v) if v.is_finite() => format_percentage(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Re-format a backend-provided percentage string such as `"-3.20%"`
pub fn reformat_percentage_str(raw: &str) -> String {
    match parse_number_str(raw) {
        Some(v) => format_percentage(v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn wrap_negative(value: f64, body: String) -> String {
    // -0.04 rounds to "0.0" and should not read as negative
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("({})", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(-5.0), "(5.0%)");
        assert_eq!(format_percentage(12.34), "12.3%");
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(-0.04), "0.0%");
        assert_eq!(format_percentage(f64::NAN), "N/A");
    }

    #[test]
    fn test_format_currency_billions() {
        assert_eq!(format_currency_billions(45.23), "$45.2B");
        assert_eq!(format_currency_billions(0.0), "$0.0B");
        assert_eq!(format_currency_billions(-1.24), "($1.2B)");
        assert_eq!(format_raw_currency_as_billions(2_500_000_000.0), "$2.5B");
    }

    #[test]
    fn test_format_pe_ratio() {
        assert_eq!(format_pe_ratio(Some(22.4)), "22.4");
        assert_eq!(format_pe_ratio(None), "N/A");
    }

    #[test]
    fn test_format_ratio_and_price() {
        assert_eq!(format_ratio(Some(0.456)), "0.46");
        assert_eq!(format_ratio(None), "N/A");
        assert_eq!(format_price(123.456), "$123.46");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(4.2)), "▲ 4.2%");
        assert_eq!(format_change(Some(-1.3)), "▼ (1.3%)");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn test_reformat_percentage_str() {
        assert_eq!(reformat_percentage_str("-3.20%"), "(3.2%)");
        assert_eq!(reformat_percentage_str("garbage"), "N/A");
    }
}
