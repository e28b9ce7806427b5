//! Raw backend vendor JSON → [`VendorRecord`].
//!
//! The backend builds vendor payloads from several upstream sources and
//! leaves gaps (nulls, missing keys, strings where numbers are expected).
//! Normalization never drops a record: a record that cannot be mapped at all
//! becomes a placeholder row tagged with its symbol.

use super::aggregate::{
    price_range_position, revenue_qoq_change, to_billions, BalanceSheet, DebtEquityBucket,
    VendorRecord, NEUTRAL_SCORE, NOT_AVAILABLE, UNKNOWN_NAME, UNKNOWN_SYMBOL,
};
use super::metric_source::MetricChain;
use crate::enums::{Industry, RiskLevel};
use crate::shared::lenient::{number_at, numbers_at, string_at, value_at};
use anyhow::{anyhow, bail, Result};
use serde_json::Value;

/// How many past quarters are kept on a record
pub const MAX_QUARTERS: usize = 4;

/// P/E values outside (0, 1000] are treated as not meaningful
pub const PE_RATIO_CEILING: f64 = 1000.0;

/// Normalize one record, falling back to a placeholder on any mapping failure
pub fn normalize_vendor(raw: &Value) -> VendorRecord {
    match try_normalize_vendor(raw) {
        Ok(record) => record,
        Err(e) => {
            let symbol = raw
                .as_object()
                .and_then(|_| string_at(raw, &["symbol"]));
            log::debug!(
                "vendor {} mapped to placeholder: {}",
                symbol.as_deref().unwrap_or(UNKNOWN_SYMBOL),
                e
            );
            VendorRecord::placeholder(symbol.as_deref())
        }
    }
}

/// Normalize every record; output length always equals input length
pub fn normalize_all(raws: &[Value]) -> Vec<VendorRecord> {
    raws.iter().map(normalize_vendor).collect()
}

/// Accepts `{"vendors": [...]}` or a bare array
pub fn parse_vendor_list(body: &Value) -> Result<Vec<VendorRecord>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("vendors") {
            Some(Value::Array(items)) => items,
            Some(other) => bail!("`vendors` is not an array: {}", type_name(other)),
            None => bail!("response has no `vendors` field"),
        },
        other => bail!("unexpected vendor list payload: {}", type_name(other)),
    };
    Ok(normalize_all(items))
}

/// Strict mapping; errors only on structurally unusable input
pub fn try_normalize_vendor(raw: &Value) -> Result<VendorRecord> {
    if !raw.is_object() {
        bail!("vendor record is {}, expected object", type_name(raw));
    }
    for key in ["symbol", "name", "vendorType", "industry"] {
        ensure_scalar(raw, key)?;
    }

    let symbol = string_at(raw, &["symbol"])
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());
    let name = string_at(raw, &["name"])
        .or_else(|| string_at(raw, &["companyName"]))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let vendor_type =
        string_at(raw, &["vendorType"]).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let industry = string_at(raw, &["industry"])
        .and_then(|label| Industry::from_label(&label))
        .or_else(|| Industry::from_vendor_type(&vendor_type))
        .unwrap_or(Industry::Unknown);

    let market_cap = non_negative(to_billions(number_at(raw, &["marketCap"]).unwrap_or(0.0)));
    let revenue = non_negative(to_billions(number_at(raw, &["revenue"]).unwrap_or(0.0)));
    let profit_margin = number_at(raw, &["profitMargin"]).unwrap_or(0.0);
    let pe_ratio = number_at(raw, &["peRatio"]).filter(|v| *v > 0.0 && *v <= PE_RATIO_CEILING);
    let beta = number_at(raw, &["beta"]).unwrap_or(0.0);
    let roe = number_at(raw, &["roe"]).unwrap_or(0.0);

    let balance_sheet = read_balance_sheet(raw);

    let debt_to_equity = MetricChain::new("debt_to_equity")
        .source(
            "financialRatios.debt_to_equity",
            number_at(raw, &["financialRatios", "debt_to_equity"]),
        )
        .source("debtToEquity", number_at(raw, &["debtToEquity"]))
        .resolve()
        .value;
    let current_ratio = MetricChain::new("current_ratio")
        .source(
            "financialRatios.current_ratio",
            number_at(raw, &["financialRatios", "current_ratio"]),
        )
        .source("currentRatio", number_at(raw, &["currentRatio"]))
        .resolve()
        .value;
    let cash_ratio = MetricChain::new("cash_ratio")
        .source(
            "financialRatios.cash_ratio",
            number_at(raw, &["financialRatios", "cash_ratio"]),
        )
        .source("cashRatio", number_at(raw, &["cashRatio"]))
        .source_with("balanceSheet.cash/total_assets", || {
            if balance_sheet.total_assets > 0.0 {
                Some(balance_sheet.cash / balance_sheet.total_assets)
            } else {
                None
            }
        })
        .resolve()
        .value;

    let week_high_52 = number_at(raw, &["weekHigh52"]).unwrap_or(0.0);
    let week_low_52 = number_at(raw, &["weekLow52"]).unwrap_or(0.0);
    let current_price = MetricChain::new("current_price")
        .source("currentPrice", number_at(raw, &["currentPrice"]).filter(|v| *v > 0.0))
        .source_with("52w midpoint", || {
            if week_high_52 > 0.0 && week_low_52 > 0.0 {
                Some((week_high_52 + week_low_52) / 2.0)
            } else {
                None
            }
        })
        .resolve()
        .or_zero();

    let raw_risk_score = MetricChain::new("risk_score")
        .source("riskScore", number_at(raw, &["riskScore"]))
        .source("riskScores.riskScore", number_at(raw, &["riskScores", "riskScore"]))
        .resolve()
        .value;
    let risk_score = score(raw_risk_score);
    let financial_health = sub_score(raw, "financialHealth");
    let market_stability = sub_score(raw, "marketStability");
    let growth_prospects = sub_score(raw, "growthProspects");
    let financial_stability = sub_score(raw, "financialStability");

    let risk_level = ["riskLevel", "risk"]
        .iter()
        .find_map(|key| string_at(raw, &[*key]))
        .or_else(|| string_at(raw, &["riskScores", "overall"]))
        .and_then(|code| RiskLevel::from_code(&code))
        .or_else(|| raw_risk_score.map(|_| RiskLevel::from_score(f64::from(risk_score))))
        .unwrap_or_default();

    let quarterly_revenue = read_quarterly_revenue(raw);
    let last_updated = string_at(raw, &["lastUpdated"]);

    Ok(VendorRecord {
        price_range_position: price_range_position(current_price, week_low_52, week_high_52),
        revenue_qoq_change: revenue_qoq_change(&quarterly_revenue),
        debt_equity_bucket: DebtEquityBucket::classify(debt_to_equity),
        symbol,
        name,
        vendor_type,
        industry,
        market_cap,
        revenue,
        profit_margin,
        pe_ratio,
        beta,
        roe,
        debt_to_equity,
        current_ratio,
        cash_ratio,
        week_high_52,
        week_low_52,
        current_price,
        risk_level,
        risk_score,
        financial_health,
        market_stability,
        growth_prospects,
        financial_stability,
        balance_sheet,
        quarterly_revenue,
        last_updated,
        is_placeholder: false,
    })
}

fn read_balance_sheet(raw: &Value) -> BalanceSheet {
    let field = |snake: &str, camel: &str| {
        number_at(raw, &["balanceSheet", snake])
            .or_else(|| number_at(raw, &["balanceSheet", camel]))
            .unwrap_or(0.0)
    };
    BalanceSheet {
        total_assets: field("total_assets", "totalAssets"),
        total_liabilities: field("total_liabilities", "totalLiabilities"),
        shareholder_equity: field("total_shareholder_equity", "totalShareholderEquity"),
        cash: field("cash_and_cash_equivalents", "cashAndCashEquivalents"),
    }
}

/// Backend lists quarters newest first; records keep newest last
fn read_quarterly_revenue(raw: &Value) -> Vec<f64> {
    let mut quarters: Vec<f64> = numbers_at(raw, &["quarterlyRevenue"])
        .into_iter()
        .take(MAX_QUARTERS)
        .collect();
    quarters.reverse();
    quarters
}

fn sub_score(raw: &Value, key: &str) -> u8 {
    score(number_at(raw, &[key]).or_else(|| number_at(raw, &["riskScores", key])))
}

fn score(value: Option<f64>) -> u8 {
    match value {
        Some(v) => v.clamp(0.0, 100.0).round() as u8,
        None => NEUTRAL_SCORE,
    }
}

fn non_negative(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

fn ensure_scalar(raw: &Value, key: &str) -> Result<()> {
    match value_at(raw, &[key]) {
        None | Some(Value::String(_)) | Some(Value::Number(_)) => Ok(()),
        Some(other) => Err(anyhow!(
            "field `{}` has unsupported type {}",
            key,
            type_name(other)
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "id": 1,
            "symbol": "TEL",
            "name": "TE Connectivity",
            "vendorType": "Sensor Supplier",
            "industry": "Sensors",
            "marketCap": 45_200_000_000.0,
            "revenue": 16_000_000_000.0,
            "profitMargin": 12.4,
            "peRatio": 22.4,
            "beta": 1.1,
            "roe": 18.0,
            "debtToEquity": 0.45,
            "weekHigh52": 160.0,
            "weekLow52": 120.0,
            "currentPrice": 140.0,
            "risk": "low",
            "riskScore": 78,
            "financialHealth": 80,
            "marketStability": 75,
            "growthProspects": 70,
            "financialStability": 85,
            "balanceSheet": {
                "total_assets": 22_000_000_000.0,
                "total_liabilities": 10_000_000_000.0,
                "total_shareholder_equity": 12_000_000_000.0,
                "cash_and_cash_equivalents": 1_100_000_000.0
            },
            "financialRatios": {
                "debt_to_equity": 0.83,
                "current_ratio": 1.6,
                "cash_ratio": 0.05
            },
            "quarterlyRevenue": [4.2, 4.0, 3.9, 3.8],
            "lastUpdated": "2024-06-01T00:00:00"
        })
    }

    #[test]
    fn test_full_record_maps_all_fields() {
        let v = normalize_vendor(&full_record());
        assert!(!v.is_placeholder);
        assert_eq!(v.symbol, "TEL");
        assert_eq!(v.industry, Industry::Sensors);
        assert!((v.market_cap - 45.2).abs() < 1e-9);
        assert!((v.revenue - 16.0).abs() < 1e-9);
        assert_eq!(v.pe_ratio, Some(22.4));
        // financialRatios outranks the top-level field
        assert_eq!(v.debt_to_equity, Some(0.83));
        assert_eq!(v.debt_equity_bucket, DebtEquityBucket::Elevated);
        assert_eq!(v.current_ratio, Some(1.6));
        assert_eq!(v.risk_level, RiskLevel::Low);
        assert_eq!(v.risk_score, 78);
        assert_eq!(v.financial_stability, 85);
        assert_eq!(v.quarterly_revenue, vec![3.8, 3.9, 4.0, 4.2]);
        assert_eq!(v.price_range_position, Some(50.0));
        assert_eq!(v.balance_sheet.total_assets_billions(), 22.0);
    }

    #[test]
    fn test_empty_object_gets_safe_defaults() {
        let v = normalize_vendor(&json!({}));
        assert!(!v.is_placeholder);
        assert_eq!(v.symbol, UNKNOWN_SYMBOL);
        assert_eq!(v.name, UNKNOWN_NAME);
        assert_eq!(v.vendor_type, NOT_AVAILABLE);
        assert_eq!(v.industry, Industry::Unknown);
        assert_eq!(v.market_cap, 0.0);
        assert_eq!(v.pe_ratio, None);
        assert_eq!(v.debt_to_equity, None);
        assert_eq!(v.risk_score, NEUTRAL_SCORE);
        assert_eq!(v.risk_level, RiskLevel::Medium);
        assert!(v.quarterly_revenue.is_empty());
        assert_eq!(v.revenue_qoq_change, None);
    }

    #[test]
    fn test_every_single_null_field_still_yields_finite_numbers() {
        let base = full_record();
        let keys: Vec<String> = base.as_object().unwrap().keys().cloned().collect();
        for key in keys {
            let mut raw = base.clone();
            raw[key.as_str()] = Value::Null;
            let v = normalize_vendor(&raw);
            for n in [
                v.market_cap,
                v.revenue,
                v.profit_margin,
                v.beta,
                v.roe,
                v.week_high_52,
                v.week_low_52,
                v.current_price,
            ] {
                assert!(n.is_finite(), "non-finite value after nulling {key}");
            }
            assert!(!v.symbol.is_empty());
            assert!(!v.name.is_empty());
            assert!(!v.vendor_type.is_empty());
        }
    }

    #[test]
    fn test_pe_ratio_bounds() {
        let pe = |raw: f64| normalize_vendor(&json!({"symbol": "X", "peRatio": raw})).pe_ratio;
        assert_eq!(pe(1500.0), None);
        assert_eq!(pe(0.0), None);
        assert_eq!(pe(-3.0), None);
        assert_eq!(pe(1000.0), Some(1000.0));
        assert_eq!(pe(22.4), Some(22.4));
    }

    #[test]
    fn test_string_numbers_and_nested_risk_scores() {
        let v = normalize_vendor(&json!({
            "symbol": "ce",
            "marketCap": "$14.5B",
            "profitMargin": "-3.2%",
            "vendorType": "Materials Supplier",
            "riskScores": {"riskScore": 40, "overall": "high", "growthProspects": 35}
        }));
        assert_eq!(v.symbol, "CE");
        assert!((v.market_cap - 14.5).abs() < 1e-9);
        assert!((v.profit_margin + 3.2).abs() < 1e-9);
        assert_eq!(v.industry, Industry::Materials);
        assert_eq!(v.risk_score, 40);
        assert_eq!(v.risk_level, RiskLevel::High);
        assert_eq!(v.growth_prospects, 35);
    }

    #[test]
    fn test_risk_level_derived_from_score_when_absent() {
        let v = normalize_vendor(&json!({"symbol": "ST", "riskScore": 60}));
        assert_eq!(v.risk_level, RiskLevel::Medium);
        let v = normalize_vendor(&json!({"symbol": "ST", "riskScore": 20, "risk": "bogus"}));
        assert_eq!(v.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_scores_are_clamped() {
        let v = normalize_vendor(&json!({"riskScore": 180, "financialHealth": -20}));
        assert_eq!(v.risk_score, 100);
        assert_eq!(v.financial_health, 0);
    }

    #[test]
    fn test_current_price_falls_back_to_midpoint() {
        let v = normalize_vendor(&json!({"weekHigh52": 100.0, "weekLow52": 80.0}));
        assert_eq!(v.current_price, 90.0);
        assert_eq!(v.price_range_position, Some(50.0));
    }

    #[test]
    fn test_cash_ratio_from_balance_sheet() {
        let v = normalize_vendor(&json!({
            "balanceSheet": {"total_assets": 1000.0, "cash_and_cash_equivalents": 30.0}
        }));
        assert_eq!(v.cash_ratio, Some(0.03));
    }

    #[test]
    fn test_malformed_records_become_placeholders() {
        let v = normalize_vendor(&json!("garbage"));
        assert!(v.is_placeholder);
        assert_eq!(v.symbol, UNKNOWN_SYMBOL);

        let v = normalize_vendor(&json!({"symbol": "dd", "name": {"first": "x"}}));
        assert!(v.is_placeholder);
        assert_eq!(v.symbol, "DD");
        assert_eq!(v.symbol, normalize_vendor(&json!({"symbol": "dd"})).symbol);
    }

    #[test]
    fn test_missing_risk_data_is_medium_risk() {
        let v = normalize_vendor(&json!({"symbol": "CE", "riskScores": {"financialHealth": 20}}));
        assert_eq!(v.risk_score, NEUTRAL_SCORE);
        assert_eq!(v.risk_level, RiskLevel::Medium);

        let scored = normalize_vendor(&json!({"symbol": "CE", "riskScore": 50}));
        assert_eq!(scored.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_list_never_shrinks() {
        let raws = vec![full_record(), json!(null), json!(42), json!({"symbol": "LYB"})];
        let out = normalize_all(&raws);
        assert_eq!(out.len(), 4);
        assert_eq!(out.iter().filter(|v| v.is_placeholder).count(), 2);
    }

    #[test]
    fn test_parse_vendor_list_envelopes() {
        let wrapped = json!({"vendors": [full_record()]});
        assert_eq!(parse_vendor_list(&wrapped).unwrap().len(), 1);

        let bare = json!([full_record(), full_record()]);
        assert_eq!(parse_vendor_list(&bare).unwrap().len(), 2);

        assert!(parse_vendor_list(&json!({"items": []})).is_err());
        assert!(parse_vendor_list(&json!("nope")).is_err());
    }
}
