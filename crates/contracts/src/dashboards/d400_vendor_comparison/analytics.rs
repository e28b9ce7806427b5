use crate::domain::a001_vendor::{DebtEquityBucket, VendorRecord};
use crate::enums::RiskLevel;
use crate::shared::format::{format_currency_billions, format_percentage, NOT_AVAILABLE};
use crate::shared::lenient::{number_at, string_at};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Portfolio KPIs
// ============================================================================

/// Portfolio-level KPIs as served by `GET /portfolio/kpis`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioKpis {
    /// Preformatted, e.g. "$215.3B"
    pub total_portfolio_value: String,
    /// Preformatted, e.g. "8.4%"
    pub avg_profit_margin: String,
    pub active_vendors: u32,
    pub avg_risk_score: u32,
    pub high_risk_vendors: u32,
    pub top_performing_vendor: String,
}

impl Default for PortfolioKpis {
    fn default() -> Self {
        Self {
            total_portfolio_value: format_currency_billions(0.0),
            avg_profit_margin: format_percentage(0.0),
            active_vendors: 0,
            avg_risk_score: 0,
            high_risk_vendors: 0,
            top_performing_vendor: NOT_AVAILABLE.to_string(),
        }
    }
}

impl PortfolioKpis {
    /// Lenient read of the backend payload; each bad field falls back alone
    pub fn from_json(raw: &Value) -> Self {
        let defaults = Self::default();
        let count = |key: &str| {
            number_at(raw, &[key])
                .filter(|v| *v >= 0.0)
                .map(|v| v.round().min(f64::from(u32::MAX)) as u32)
                .unwrap_or(0)
        };
        Self {
            total_portfolio_value: string_at(raw, &["totalPortfolioValue"])
                .unwrap_or(defaults.total_portfolio_value),
            avg_profit_margin: string_at(raw, &["avgProfitMargin"])
                .unwrap_or(defaults.avg_profit_margin),
            active_vendors: count("activeVendors"),
            avg_risk_score: count("avgRiskScore"),
            high_risk_vendors: count("highRiskVendors"),
            top_performing_vendor: string_at(raw, &["topPerformingVendor"])
                .unwrap_or(defaults.top_performing_vendor),
        }
    }

    /// Client-side computation used when the KPI endpoint is unavailable
    pub fn derive(vendors: &[VendorRecord]) -> Self {
        if vendors.is_empty() {
            return Self::default();
        }
        let n = vendors.len() as f64;
        let total_value: f64 = vendors.iter().map(|v| v.market_cap).sum();
        let avg_margin = vendors.iter().map(|v| v.profit_margin).sum::<f64>() / n;
        let avg_score = vendors.iter().map(VendorRecord::combined_score).sum::<f64>() / n;
        let high_risk = vendors
            .iter()
            .filter(|v| v.risk_level == RiskLevel::High)
            .count();

        Self {
            total_portfolio_value: format_currency_billions(total_value),
            avg_profit_margin: format_percentage(avg_margin),
            active_vendors: vendors.len() as u32,
            avg_risk_score: avg_score.round() as u32,
            high_risk_vendors: high_risk as u32,
            top_performing_vendor: top_performer(vendors)
                .map(|v| v.name.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Highest combined score; the first vendor wins ties
pub fn top_performer(vendors: &[VendorRecord]) -> Option<&VendorRecord> {
    vendors.iter().fold(None, |best: Option<&VendorRecord>, v| match best {
        Some(b) if b.combined_score() >= v.combined_score() => Some(b),
        _ => Some(v),
    })
}

// ============================================================================
// Risk analysis
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    /// Share of `level` in percent, 0 on an empty distribution
    pub fn share(&self, level: RiskLevel) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(level) as f64 * 100.0 / total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageScores {
    pub financial_health: f64,
    pub market_stability: f64,
    pub growth_prospects: f64,
    pub financial_stability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub distribution: RiskDistribution,
    pub average_scores: AverageScores,
    /// Counts per bucket, in `DebtEquityBucket::all()` order
    pub debt_equity_buckets: Vec<(DebtEquityBucket, usize)>,
    /// High-risk vendors, highest risk score first
    pub highest_risk: Vec<String>,
}

impl RiskAnalysis {
    pub fn from_vendors(vendors: &[VendorRecord]) -> Self {
        let mut distribution = RiskDistribution::default();
        for v in vendors {
            match v.risk_level {
                RiskLevel::Low => distribution.low += 1,
                RiskLevel::Medium => distribution.medium += 1,
                RiskLevel::High => distribution.high += 1,
            }
        }

        let average_scores = if vendors.is_empty() {
            AverageScores::default()
        } else {
            let n = vendors.len() as f64;
            let avg = |f: fn(&VendorRecord) -> u8| {
                vendors.iter().map(|v| f64::from(f(v))).sum::<f64>() / n
            };
            AverageScores {
                financial_health: avg(|v| v.financial_health),
                market_stability: avg(|v| v.market_stability),
                growth_prospects: avg(|v| v.growth_prospects),
                financial_stability: avg(|v| v.financial_stability),
            }
        };

        let debt_equity_buckets = DebtEquityBucket::all()
            .into_iter()
            .map(|bucket| {
                let count = vendors
                    .iter()
                    .filter(|v| v.debt_equity_bucket == bucket)
                    .count();
                (bucket, count)
            })
            .collect();

        let mut high: Vec<&VendorRecord> = vendors
            .iter()
            .filter(|v| v.risk_level == RiskLevel::High)
            .collect();
        high.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
        let highest_risk = high.into_iter().map(|v| v.symbol.clone()).collect();

        Self {
            distribution,
            average_scores,
            debt_equity_buckets,
            highest_risk,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.distribution.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vendor::normalize_vendor;
    use serde_json::json;

    fn sample() -> Vec<VendorRecord> {
        vec![
            normalize_vendor(&json!({
                "symbol": "TEL", "name": "TE Connectivity", "industry": "Sensors",
                "marketCap": 45_000_000_000.0, "profitMargin": 12.0, "risk": "low",
                "financialHealth": 80, "marketStability": 80, "growthProspects": 80,
                "debtToEquity": 0.2
            })),
            normalize_vendor(&json!({
                "symbol": "CE", "name": "Celanese", "industry": "Plastics",
                "marketCap": 12_000_000_000.0, "profitMargin": -4.0, "risk": "high",
                "riskScore": 30,
                "financialHealth": 40, "marketStability": 40, "growthProspects": 40,
                "debtToEquity": 1.6
            })),
            normalize_vendor(&json!({
                "symbol": "LYB", "name": "LyondellBasell", "industry": "Plastics",
                "marketCap": 30_000_000_000.0, "profitMargin": 7.0, "risk": "high",
                "riskScore": 45,
                "financialHealth": 80, "marketStability": 80, "growthProspects": 80
            })),
        ]
    }

    #[test]
    fn test_derive_kpis() {
        let kpis = PortfolioKpis::derive(&sample());
        assert_eq!(kpis.total_portfolio_value, "$87.0B");
        assert_eq!(kpis.avg_profit_margin, "5.0%");
        assert_eq!(kpis.active_vendors, 3);
        assert_eq!(kpis.avg_risk_score, 67);
        assert_eq!(kpis.high_risk_vendors, 2);
        // TEL and LYB tie; the first one wins
        assert_eq!(kpis.top_performing_vendor, "TE Connectivity");
    }

    #[test]
    fn test_derive_kpis_empty() {
        let kpis = PortfolioKpis::derive(&[]);
        assert_eq!(kpis.total_portfolio_value, "$0.0B");
        assert_eq!(kpis.avg_profit_margin, "0.0%");
        assert_eq!(kpis.active_vendors, 0);
        assert_eq!(kpis.top_performing_vendor, "N/A");
    }

    #[test]
    fn test_kpis_from_json_is_lenient() {
        let kpis = PortfolioKpis::from_json(&json!({
            "totalPortfolioValue": "$215.3B",
            "avgProfitMargin": null,
            "activeVendors": "5",
            "avgRiskScore": 61.6,
            "highRiskVendors": -2
        }));
        assert_eq!(kpis.total_portfolio_value, "$215.3B");
        assert_eq!(kpis.avg_profit_margin, "0.0%");
        assert_eq!(kpis.active_vendors, 5);
        assert_eq!(kpis.avg_risk_score, 62);
        assert_eq!(kpis.high_risk_vendors, 0);
        assert_eq!(kpis.top_performing_vendor, "N/A");
    }

    #[test]
    fn test_risk_analysis() {
        let analysis = RiskAnalysis::from_vendors(&sample());
        assert_eq!(analysis.distribution, RiskDistribution { low: 1, medium: 0, high: 2 });
        assert_eq!(analysis.highest_risk, vec!["LYB", "CE"]);
        assert!((analysis.average_scores.financial_health - 200.0 / 3.0).abs() < 1e-9);
        let leveraged = analysis
            .debt_equity_buckets
            .iter()
            .find(|(b, _)| *b == DebtEquityBucket::Leveraged)
            .map(|(_, c)| *c);
        assert_eq!(leveraged, Some(1));
        assert!(!analysis.is_empty());
    }

    #[test]
    fn test_vendor_without_risk_data_is_not_high_risk() {
        let vendors = vec![normalize_vendor(&json!({"symbol": "ST", "name": "Sensata"}))];
        assert_eq!(PortfolioKpis::derive(&vendors).high_risk_vendors, 0);

        let analysis = RiskAnalysis::from_vendors(&vendors);
        assert_eq!(analysis.distribution, RiskDistribution { low: 0, medium: 1, high: 0 });
        assert!(analysis.highest_risk.is_empty());
    }

    #[test]
    fn test_risk_analysis_empty() {
        let analysis = RiskAnalysis::from_vendors(&[]);
        assert!(analysis.is_empty());
        assert_eq!(analysis.average_scores, AverageScores::default());
        assert!(analysis.highest_risk.is_empty());
        assert_eq!(analysis.distribution.share(RiskLevel::High), 0.0);
    }
}
