use crate::dashboards::d400_vendor_comparison::analytics::{PortfolioKpis, RiskAnalysis};
use crate::dashboards::d400_vendor_comparison::recommendations::generate_recommendations;
use crate::domain::a001_vendor::VendorRecord;
use crate::enums::RiskLevel;
use crate::shared::format::{
    format_currency_billions, format_pe_ratio, format_percentage, format_price, format_ratio,
};
use chrono::NaiveDateTime;

pub const SECTION_EXECUTIVE_SUMMARY: &str = "EXECUTIVE SUMMARY";
pub const SECTION_VENDOR_DETAILS: &str = "VENDOR DETAILS";
pub const SECTION_PORTFOLIO_ANALYSIS: &str = "PORTFOLIO ANALYSIS";
pub const SECTION_RECOMMENDATIONS: &str = "RECOMMENDATIONS";

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Plain-text portfolio report. Pure: the timestamp is supplied by the caller.
pub fn generate_text_report(
    vendors: &[VendorRecord],
    kpis: &PortfolioKpis,
    generated_at: NaiveDateTime,
) -> String {
    let mut out = String::new();
    line(&mut out, RULE);
    line(&mut out, "VENDOR COMPARISON REPORT");
    line(
        &mut out,
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
    );
    line(&mut out, RULE);
    out.push('\n');

    executive_summary(&mut out, kpis);
    vendor_details(&mut out, vendors);
    portfolio_analysis(&mut out, vendors);
    recommendations(&mut out, vendors);
    out
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    line(out, title);
    line(out, THIN_RULE);
}

fn executive_summary(out: &mut String, kpis: &PortfolioKpis) {
    section(out, SECTION_EXECUTIVE_SUMMARY);
    line(out, &format!("Total Portfolio Value: {}", kpis.total_portfolio_value));
    line(out, &format!("Active Vendors: {}", kpis.active_vendors));
    line(out, &format!("Average Profit Margin: {}", kpis.avg_profit_margin));
    line(out, &format!("Average Risk Score: {}", kpis.avg_risk_score));
    line(out, &format!("High Risk Vendors: {}", kpis.high_risk_vendors));
    line(out, &format!("Top Performer: {}", kpis.top_performing_vendor));
    out.push('\n');
}

fn vendor_details(out: &mut String, vendors: &[VendorRecord]) {
    section(out, SECTION_VENDOR_DETAILS);
    if vendors.is_empty() {
        line(out, "No vendor data available.");
        out.push('\n');
        return;
    }
    for v in vendors {
        line(out, &format!("{} ({})", v.name, v.symbol));
        line(out, &format!("  Industry: {}", v.industry));
        line(out, &format!("  Market Cap: {}", format_currency_billions(v.market_cap)));
        line(out, &format!("  Revenue: {}", format_currency_billions(v.revenue)));
        line(out, &format!("  Profit Margin: {}", format_percentage(v.profit_margin)));
        line(out, &format!("  P/E Ratio: {}", format_pe_ratio(v.pe_ratio)));
        line(out, &format!("  Debt to Equity: {}", format_ratio(v.debt_to_equity)));
        line(out, &format!("  Current Ratio: {}", format_ratio(v.current_ratio)));
        line(out, &format!("  Current Price: {}", format_price(v.current_price)));
        line(
            out,
            &format!(
                "  Risk: {} (score {})",
                v.risk_level.display_name(),
                v.risk_score
            ),
        );
        out.push('\n');
    }
}

fn portfolio_analysis(out: &mut String, vendors: &[VendorRecord]) {
    section(out, SECTION_PORTFOLIO_ANALYSIS);
    let analysis = RiskAnalysis::from_vendors(vendors);
    if analysis.is_empty() {
        line(out, "No portfolio data available.");
        out.push('\n');
        return;
    }
    line(out, "Risk Distribution:");
    for level in RiskLevel::all() {
        line(
            out,
            &format!(
                "  {}: {} ({})",
                level.display_name(),
                analysis.distribution.count(level),
                format_percentage(analysis.distribution.share(level))
            ),
        );
    }
    let scores = analysis.average_scores;
    line(out, "Average Scores:");
    line(out, &format!("  Financial Health: {:.1}", scores.financial_health));
    line(out, &format!("  Market Stability: {:.1}", scores.market_stability));
    line(out, &format!("  Growth Prospects: {:.1}", scores.growth_prospects));
    line(out, &format!("  Financial Stability: {:.1}", scores.financial_stability));
    line(out, "Debt/Equity Profile:");
    for (bucket, count) in &analysis.debt_equity_buckets {
        line(out, &format!("  {}: {}", bucket.display_name(), count));
    }
    out.push('\n');
}

fn recommendations(out: &mut String, vendors: &[VendorRecord]) {
    section(out, SECTION_RECOMMENDATIONS);
    let recs = generate_recommendations(vendors);
    if recs.is_empty() {
        line(out, "No action required. Portfolio health is excellent.");
        return;
    }
    for (i, rec) in recs.iter().enumerate() {
        line(
            out,
            &format!("{}. [{}] {}", i + 1, rec.priority.code().to_uppercase(), rec.title),
        );
        line(out, &format!("   {}", rec.description));
        line(out, &format!("   Action: {}", rec.action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vendor::normalize_vendor;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp")
    }

    fn section_positions(report: &str) -> Vec<usize> {
        [
            SECTION_EXECUTIVE_SUMMARY,
            SECTION_VENDOR_DETAILS,
            SECTION_PORTFOLIO_ANALYSIS,
            SECTION_RECOMMENDATIONS,
        ]
        .iter()
        .map(|s| report.find(s).expect("section present"))
        .collect()
    }

    #[test]
    fn test_sections_in_order() {
        let vendors = vec![normalize_vendor(&json!({
            "symbol": "TEL", "name": "TE Connectivity", "industry": "Sensors",
            "debtToEquity": 1.3
        }))];
        let kpis = PortfolioKpis::derive(&vendors);
        let report = generate_text_report(&vendors, &kpis, ts());

        let positions = section_positions(&report);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(report.contains("Generated: 2024-03-01 09:30:00"));
        assert!(report.contains("TE Connectivity (TEL)"));
        assert!(report.contains("[HIGH] High Leverage Detected"));
    }

    #[test]
    fn test_empty_portfolio_report() {
        let report = generate_text_report(&[], &PortfolioKpis::default(), ts());
        section_positions(&report);
        assert!(report.contains("No vendor data available."));
        assert!(report.contains("No portfolio data available."));
        assert!(report.contains("Portfolio health is excellent"));
        assert!(report.contains("Total Portfolio Value: $0.0B"));
    }
}
