use crate::enums::{Industry, RiskLevel};
use serde::{Deserialize, Serialize};

// ============================================================================
// Value objects
// ============================================================================

/// Latest annual balance sheet figures, in raw currency units
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub shareholder_equity: f64,
    pub cash: f64,
}

impl BalanceSheet {
    pub fn total_assets_billions(&self) -> f64 {
        to_billions(self.total_assets)
    }

    pub fn total_liabilities_billions(&self) -> f64 {
        to_billions(self.total_liabilities)
    }

    pub fn shareholder_equity_billions(&self) -> f64 {
        to_billions(self.shareholder_equity)
    }

    pub fn cash_billions(&self) -> f64 {
        to_billions(self.cash)
    }

    pub fn is_empty(&self) -> bool {
        self.total_assets == 0.0
            && self.total_liabilities == 0.0
            && self.shareholder_equity == 0.0
            && self.cash == 0.0
    }
}

/// Convert raw currency units to billions, collapsing NaN/inf to 0
pub fn to_billions(raw: f64) -> f64 {
    let v = raw / 1_000_000_000.0;
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Leverage classification by debt/equity ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtEquityBucket {
    /// below 0.3
    Conservative,
    /// 0.3 to 0.6
    Moderate,
    /// 0.6 to 1.0 inclusive
    Elevated,
    /// above 1.0
    Leveraged,
    Unknown,
}

impl DebtEquityBucket {
    pub fn classify(debt_to_equity: Option<f64>) -> Self {
        match debt_to_equity {
            None => DebtEquityBucket::Unknown,
            Some(v) if v < 0.3 => DebtEquityBucket::Conservative,
            Some(v) if v < 0.6 => DebtEquityBucket::Moderate,
            Some(v) if v <= 1.0 => DebtEquityBucket::Elevated,
            Some(_) => DebtEquityBucket::Leveraged,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebtEquityBucket::Conservative => "Conservative (<0.3)",
            DebtEquityBucket::Moderate => "Moderate (0.3-0.6)",
            DebtEquityBucket::Elevated => "Elevated (0.6-1.0)",
            DebtEquityBucket::Leveraged => "Leveraged (>1.0)",
            DebtEquityBucket::Unknown => "N/A",
        }
    }

    pub fn all() -> Vec<DebtEquityBucket> {
        vec![
            DebtEquityBucket::Conservative,
            DebtEquityBucket::Moderate,
            DebtEquityBucket::Elevated,
            DebtEquityBucket::Leveraged,
            DebtEquityBucket::Unknown,
        ]
    }
}

// ============================================================================
// Vendor record
// ============================================================================

/// Neutral score used by the backend when a sub-score could not be computed
pub const NEUTRAL_SCORE: u8 = 50;

pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";
pub const UNKNOWN_NAME: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// Fully normalized vendor, safe to display and aggregate.
///
/// Monetary totals (`market_cap`, `revenue`, `quarterly_revenue`) are in
/// billions; `balance_sheet` keeps raw currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub symbol: String,
    pub name: String,
    pub vendor_type: String,
    pub industry: Industry,

    pub market_cap: f64,
    pub revenue: f64,
    pub profit_margin: f64,
    /// `None` when the reported ratio is not meaningful (<= 0 or > 1000)
    pub pe_ratio: Option<f64>,
    pub beta: f64,
    pub roe: f64,

    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub cash_ratio: Option<f64>,

    pub week_high_52: f64,
    pub week_low_52: f64,
    pub current_price: f64,

    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub financial_health: u8,
    pub market_stability: u8,
    pub growth_prospects: u8,
    pub financial_stability: u8,

    pub balance_sheet: BalanceSheet,
    /// Most recent quarter last
    pub quarterly_revenue: Vec<f64>,
    pub last_updated: Option<String>,

    // Derived
    pub price_range_position: Option<f64>,
    pub revenue_qoq_change: Option<f64>,
    pub debt_equity_bucket: DebtEquityBucket,

    /// Set when the raw record could not be mapped at all
    pub is_placeholder: bool,
}

impl VendorRecord {
    /// Fully-defaulted row standing in for a record that failed to map
    pub fn placeholder(symbol: Option<&str>) -> Self {
        let symbol = symbol
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SYMBOL)
            .to_uppercase();
        Self {
            symbol,
            name: UNKNOWN_NAME.to_string(),
            vendor_type: NOT_AVAILABLE.to_string(),
            industry: Industry::Unknown,
            market_cap: 0.0,
            revenue: 0.0,
            profit_margin: 0.0,
            pe_ratio: None,
            beta: 0.0,
            roe: 0.0,
            debt_to_equity: None,
            current_ratio: None,
            cash_ratio: None,
            week_high_52: 0.0,
            week_low_52: 0.0,
            current_price: 0.0,
            risk_level: RiskLevel::Medium,
            risk_score: NEUTRAL_SCORE,
            financial_health: NEUTRAL_SCORE,
            market_stability: NEUTRAL_SCORE,
            growth_prospects: NEUTRAL_SCORE,
            financial_stability: NEUTRAL_SCORE,
            balance_sheet: BalanceSheet::default(),
            quarterly_revenue: Vec::new(),
            last_updated: None,
            price_range_position: None,
            revenue_qoq_change: None,
            debt_equity_bucket: DebtEquityBucket::Unknown,
            is_placeholder: true,
        }
    }

    /// Mean of health, stability and growth, as used for "top performer"
    pub fn combined_score(&self) -> f64 {
        (f64::from(self.financial_health)
            + f64::from(self.market_stability)
            + f64::from(self.growth_prospects))
            / 3.0
    }

    /// Most recent quarterly revenue, if any
    pub fn latest_quarter_revenue(&self) -> Option<f64> {
        self.quarterly_revenue.last().copied()
    }
}

/// Position of `price` inside the 52-week range, as 0..=100
pub fn price_range_position(price: f64, low: f64, high: f64) -> Option<f64> {
    let span = high - low;
    if price <= 0.0 || low <= 0.0 || span <= 0.0 || !span.is_finite() {
        return None;
    }
    let pos = (price - low) / span * 100.0;
    if pos.is_finite() {
        Some(pos.clamp(0.0, 100.0))
    } else {
        None
    }
}

/// Percentage change between the last two quarters (most recent last)
pub fn revenue_qoq_change(quarters: &[f64]) -> Option<f64> {
    let [.., previous, latest] = quarters else {
        return None;
    };
    if *previous == 0.0 {
        return None;
    }
    let change = (latest - previous) / previous.abs() * 100.0;
    if change.is_finite() {
        Some(change)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_equity_buckets() {
        assert_eq!(DebtEquityBucket::classify(None), DebtEquityBucket::Unknown);
        assert_eq!(
            DebtEquityBucket::classify(Some(0.1)),
            DebtEquityBucket::Conservative
        );
        assert_eq!(
            DebtEquityBucket::classify(Some(0.3)),
            DebtEquityBucket::Moderate
        );
        assert_eq!(
            DebtEquityBucket::classify(Some(1.0)),
            DebtEquityBucket::Elevated
        );
        assert_eq!(
            DebtEquityBucket::classify(Some(1.01)),
            DebtEquityBucket::Leveraged
        );
    }

    #[test]
    fn test_price_range_position() {
        assert_eq!(price_range_position(150.0, 100.0, 200.0), Some(50.0));
        assert_eq!(price_range_position(250.0, 100.0, 200.0), Some(100.0));
        assert_eq!(price_range_position(150.0, 200.0, 200.0), None);
        assert_eq!(price_range_position(0.0, 100.0, 200.0), None);
    }

    #[test]
    fn test_revenue_qoq_change() {
        assert_eq!(revenue_qoq_change(&[]), None);
        assert_eq!(revenue_qoq_change(&[4.0]), None);
        assert_eq!(revenue_qoq_change(&[3.0, 4.0, 5.0]), Some(25.0));
        assert_eq!(revenue_qoq_change(&[0.0, 5.0]), None);
    }

    #[test]
    fn test_placeholder_defaults() {
        let p = VendorRecord::placeholder(None);
        assert_eq!(p.symbol, UNKNOWN_SYMBOL);
        assert!(p.is_placeholder);
        assert_eq!(p.risk_level, RiskLevel::Medium);

        let p = VendorRecord::placeholder(Some(" TEL "));
        assert_eq!(p.symbol, "TEL");
    }

    #[test]
    fn test_to_billions_guards_non_finite() {
        assert_eq!(to_billions(2_500_000_000.0), 2.5);
        assert_eq!(to_billions(f64::NAN), 0.0);
        assert_eq!(to_billions(f64::INFINITY), 0.0);
    }
}
