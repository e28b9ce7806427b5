use crate::domain::a001_vendor::VendorRecord;
use crate::enums::Industry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const HIGH_LEVERAGE_THRESHOLD: f64 = 1.0;
pub const MIN_CURRENT_RATIO: f64 = 1.0;
pub const MIN_CASH_RATIO: f64 = 0.05;
pub const STRONG_STABILITY_SCORE: u8 = 75;
pub const STRONG_MAX_DEBT_TO_EQUITY: f64 = 0.6;
pub const STRONG_MIN_MARGIN: f64 = 5.0;
pub const CONCENTRATION_SHARE: f64 = 70.0;
pub const WEAK_GROWTH_SCORE: u8 = 40;
pub const WEAK_GROWTH_SHARE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn code(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::High => "High Priority",
            Priority::Medium => "Medium Priority",
            Priority::Low => "Opportunity",
        }
    }

    /// Same palette as risk badges
    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::High => "risk-badge risk-badge--red",
            Priority::Medium => "risk-badge risk-badge--amber",
            Priority::Low => "risk-badge risk-badge--emerald",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action: String,
    pub affected_symbols: Vec<String>,
}

/// Run every rule over the list. Rules are independent; the result is
/// ordered high → medium → low, rule order preserved within a priority.
pub fn generate_recommendations(vendors: &[VendorRecord]) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = [
        high_leverage(vendors),
        liquidity_risk(vendors),
        low_cash(vendors),
        negative_margin(vendors),
        strong_performers(vendors),
        industry_concentration(vendors),
        growth_concern(vendors),
    ]
    .into_iter()
    .flatten()
    .collect();

    out.sort_by_key(|r| r.priority);
    out
}

fn symbols_where<F>(vendors: &[VendorRecord], predicate: F) -> Vec<String>
where
    F: Fn(&VendorRecord) -> bool,
{
    vendors
        .iter()
        .filter(|v| predicate(v))
        .map(|v| v.symbol.clone())
        .collect()
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

// ============================================================================
// Rules
// ============================================================================

fn high_leverage(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let affected = symbols_where(vendors, |v| {
        v.debt_to_equity.is_some_and(|d| d > HIGH_LEVERAGE_THRESHOLD)
    });
    if affected.is_empty() {
        return None;
    }
    Some(Recommendation {
        id: "high-leverage".to_string(),
        priority: Priority::High,
        title: "High Leverage Detected".to_string(),
        description: format!(
            "{} vendor(s) carry debt/equity above {:.1}: {}",
            affected.len(),
            HIGH_LEVERAGE_THRESHOLD,
            affected.join(", ")
        ),
        action: "Review credit exposure and consider payment terms that limit prepayments."
            .to_string(),
        affected_symbols: affected,
    })
}

fn liquidity_risk(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let affected = symbols_where(vendors, |v| {
        v.current_ratio.is_some_and(|c| c < MIN_CURRENT_RATIO)
    });
    if affected.is_empty() {
        return None;
    }
    Some(Recommendation {
        id: "liquidity-risk".to_string(),
        priority: Priority::High,
        title: "Liquidity Risk".to_string(),
        description: format!(
            "{} vendor(s) have a current ratio below {:.1}: {}",
            affected.len(),
            MIN_CURRENT_RATIO,
            affected.join(", ")
        ),
        action: "Monitor short-term obligations and qualify alternative suppliers.".to_string(),
        affected_symbols: affected,
    })
}

fn low_cash(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let affected = symbols_where(vendors, |v| v.cash_ratio.is_some_and(|c| c < MIN_CASH_RATIO));
    if affected.is_empty() {
        return None;
    }
    Some(Recommendation {
        id: "low-cash".to_string(),
        priority: Priority::Medium,
        title: "Low Cash Reserves".to_string(),
        description: format!(
            "{} vendor(s) hold cash below {:.0}% of total assets: {}",
            affected.len(),
            MIN_CASH_RATIO * 100.0,
            affected.join(", ")
        ),
        action: "Track cash position in upcoming quarterly filings.".to_string(),
        affected_symbols: affected,
    })
}

fn negative_margin(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let affected = symbols_where(vendors, |v| v.profit_margin < 0.0);
    if affected.is_empty() {
        return None;
    }
    Some(Recommendation {
        id: "negative-margin".to_string(),
        priority: Priority::High,
        title: "Unprofitable Vendors".to_string(),
        description: format!(
            "{} vendor(s) report a negative profit margin: {}",
            affected.len(),
            affected.join(", ")
        ),
        action: "Assess supply continuity and prepare contingency sourcing.".to_string(),
        affected_symbols: affected,
    })
}

fn strong_performers(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let affected = symbols_where(vendors, |v| {
        v.financial_stability > STRONG_STABILITY_SCORE
            && v.debt_to_equity.is_some_and(|d| d < STRONG_MAX_DEBT_TO_EQUITY)
            && v.profit_margin > STRONG_MIN_MARGIN
    });
    if affected.is_empty() {
        return None;
    }
    Some(Recommendation {
        id: "strong-performers".to_string(),
        priority: Priority::Low,
        title: "Strong Performers".to_string(),
        description: format!(
            "{} vendor(s) combine high stability, low leverage and healthy margins: {}",
            affected.len(),
            affected.join(", ")
        ),
        action: "Consider expanding volume or negotiating long-term agreements.".to_string(),
        affected_symbols: affected,
    })
}

fn industry_concentration(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let mut counts: HashMap<Industry, usize> = HashMap::new();
    for v in vendors {
        *counts.entry(v.industry).or_default() += 1;
    }

    // Iterate in a fixed order so the result does not depend on hash order
    let (industry, count) = Industry::all()
        .into_iter()
        .map(|i| (i, counts.get(&i).copied().unwrap_or(0)))
        .max_by_key(|(_, c)| *c)?;

    let pct = share(count, vendors.len());
    if pct <= CONCENTRATION_SHARE {
        return None;
    }
    let affected = symbols_where(vendors, |v| v.industry == industry);
    Some(Recommendation {
        id: "industry-concentration".to_string(),
        priority: Priority::Medium,
        title: "Industry Concentration".to_string(),
        description: format!(
            "{:.0}% of vendors are in {}. Sector downturns would affect most of the portfolio.",
            pct,
            industry.display_name()
        ),
        action: "Diversify sourcing across additional industries.".to_string(),
        affected_symbols: affected,
    })
}

fn growth_concern(vendors: &[VendorRecord]) -> Option<Recommendation> {
    let affected = symbols_where(vendors, |v| v.growth_prospects < WEAK_GROWTH_SCORE);
    let pct = share(affected.len(), vendors.len());
    if pct <= WEAK_GROWTH_SHARE {
        return None;
    }
    Some(Recommendation {
        id: "growth-concern".to_string(),
        priority: Priority::Medium,
        title: "Weak Growth Outlook".to_string(),
        description: format!(
            "{:.0}% of vendors score below {} on growth prospects: {}",
            pct,
            WEAK_GROWTH_SCORE,
            affected.join(", ")
        ),
        action: "Re-evaluate long-term commitments with low-growth vendors.".to_string(),
        affected_symbols: affected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vendor::normalize_vendor;
    use serde_json::{json, Value};

    fn vendor(raw: Value) -> VendorRecord {
        normalize_vendor(&raw)
    }

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_list_has_no_recommendations() {
        assert!(generate_recommendations(&[]).is_empty());
    }

    #[test]
    fn test_industry_concentration_eighty_percent() {
        let vendors: Vec<VendorRecord> = ["A", "B", "C", "D"]
            .iter()
            .map(|s| vendor(json!({"symbol": s, "industry": "Sensors"})))
            .chain(std::iter::once(vendor(json!({"symbol": "E", "industry": "Materials"}))))
            .collect();

        let recs = generate_recommendations(&vendors);
        let rec = recs
            .iter()
            .find(|r| r.id == "industry-concentration")
            .expect("concentration rule should fire");
        assert_eq!(rec.priority, Priority::Medium);
        assert!(rec.description.starts_with("80%"));
        assert_eq!(rec.affected_symbols, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_seventy_percent_is_not_concentrated() {
        let mut vendors: Vec<VendorRecord> = (0..7)
            .map(|i| vendor(json!({"symbol": format!("S{i}"), "industry": "Sensors"})))
            .collect();
        vendors.extend(
            (0..3).map(|i| vendor(json!({"symbol": format!("M{i}"), "industry": "Plastics"}))),
        );
        let recs = generate_recommendations(&vendors);
        assert!(!ids(&recs).contains(&"industry-concentration"));
    }

    #[test]
    fn test_ratio_rules_skip_missing_ratios() {
        let vendors = vec![
            vendor(json!({"symbol": "A", "industry": "Sensors"})),
            vendor(json!({"symbol": "B", "industry": "Materials"})),
        ];
        let recs = generate_recommendations(&vendors);
        assert!(!ids(&recs).contains(&"high-leverage"));
        assert!(!ids(&recs).contains(&"liquidity-risk"));
        assert!(!ids(&recs).contains(&"low-cash"));
    }

    #[test]
    fn test_rules_fire_and_sort_by_priority() {
        let vendors = vec![
            vendor(json!({
                "symbol": "LEV",
                "industry": "Sensors",
                "debtToEquity": 1.4,
                "currentRatio": 0.8,
                "cashRatio": 0.02,
                "profitMargin": -3.0,
                "growthProspects": 20
            })),
            vendor(json!({
                "symbol": "GOOD",
                "industry": "Materials",
                "debtToEquity": 0.3,
                "currentRatio": 2.0,
                "cashRatio": 0.2,
                "profitMargin": 12.0,
                "financialStability": 90
            })),
        ];
        let recs = generate_recommendations(&vendors);
        assert_eq!(
            ids(&recs),
            vec![
                "high-leverage",
                "liquidity-risk",
                "negative-margin",
                "low-cash",
                "growth-concern",
                "strong-performers"
            ]
        );
        assert_eq!(recs[0].affected_symbols, vec!["LEV"]);
        assert_eq!(
            recs.last().map(|r| r.affected_symbols.clone()),
            Some(vec!["GOOD".to_string()])
        );
    }

    #[test]
    fn test_growth_concern_needs_more_than_thirty_percent() {
        let mut vendors: Vec<VendorRecord> = (0..7)
            .map(|i| {
                let industry = if i % 2 == 0 { "Sensors" } else { "Plastics" };
                vendor(json!({
                    "symbol": format!("G{i}"),
                    "industry": industry,
                    "growthProspects": 60
                }))
            })
            .collect();
        vendors.extend((0..3).map(|i| {
            vendor(json!({
                "symbol": format!("W{i}"),
                "industry": "Materials",
                "growthProspects": 10
            }))
        }));
        assert!(!ids(&generate_recommendations(&vendors)).contains(&"growth-concern"));

        vendors.push(vendor(json!({
            "symbol": "W3",
            "industry": "Materials",
            "growthProspects": 10
        })));
        assert!(ids(&generate_recommendations(&vendors)).contains(&"growth-concern"));
    }
}
