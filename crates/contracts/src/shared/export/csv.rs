use crate::domain::a001_vendor::VendorRecord;
use crate::shared::format::NOT_AVAILABLE;
use anyhow::{Context, Result};

/// Column order of the vendor CSV export
pub const VENDOR_CSV_HEADERS: [&str; 15] = [
    "Company",
    "Symbol",
    "Industry",
    "Market Cap (B)",
    "Revenue (B)",
    "Profit Margin (%)",
    "P/E Ratio",
    "52W High",
    "52W Low",
    "Current Price",
    "Risk Level",
    "Risk Score",
    "Beta",
    "ROE (%)",
    "Debt to Equity",
];

/// Types that can be written as one CSV row
pub trait CsvExportable {
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

impl CsvExportable for VendorRecord {
    fn headers() -> Vec<&'static str> {
        VENDOR_CSV_HEADERS.to_vec()
    }

    fn to_csv_row(&self) -> Vec<String> {
        let optional = |v: Option<f64>| {
            v.map(|x| format!("{:.2}", x))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        vec![
            self.name.clone(),
            self.symbol.clone(),
            self.industry.display_name().to_string(),
            format!("{:.2}", self.market_cap),
            format!("{:.2}", self.revenue),
            format!("{:.2}", self.profit_margin),
            optional(self.pe_ratio),
            format!("{:.2}", self.week_high_52),
            format!("{:.2}", self.week_low_52),
            format!("{:.2}", self.current_price),
            self.risk_level.code().to_string(),
            self.risk_score.to_string(),
            format!("{:.2}", self.beta),
            format!("{:.2}", self.roe),
            optional(self.debt_to_equity),
        ]
    }
}

/// Serialize rows with a header line. An empty slice yields the header only.
pub fn to_csv_string<T: CsvExportable>(data: &[T]) -> Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(T::headers())
        .context("failed to write CSV header")?;
    for item in data {
        writer
            .write_record(item.to_csv_row())
            .context("failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vendor::normalize_vendor;
    use serde_json::json;

    #[test]
    fn test_header_order() {
        let out = to_csv_string::<VendorRecord>(&[]).expect("csv");
        assert_eq!(
            out,
            "Company,Symbol,Industry,Market Cap (B),Revenue (B),Profit Margin (%),P/E Ratio,\
             52W High,52W Low,Current Price,Risk Level,Risk Score,Beta,ROE (%),Debt to Equity\r\n"
        );
    }

    #[test]
    fn test_row_values_and_missing_ratios() {
        let vendor = normalize_vendor(&json!({
            "symbol": "DD",
            "name": "DuPont de Nemours, Inc.",
            "industry": "Materials",
            "marketCap": 30_500_000_000.0,
            "revenue": 12_000_000_000.0,
            "profitMargin": -1.5,
            "peRatio": 1500,
            "weekHigh52": 90.0,
            "weekLow52": 60.0,
            "risk": "medium",
            "riskScore": 60,
            "beta": 1.2,
            "roe": 4.0
        }));
        let out = to_csv_string(&[vendor]).expect("csv");
        let mut lines = out.lines();
        lines.next();
        assert_eq!(
            lines.next(),
            Some(concat!(
                "\"DuPont de Nemours, Inc.\",DD,Materials,30.50,12.00,-1.50,N/A,",
                "90.00,60.00,75.00,medium,60,1.20,4.00,N/A"
            ))
        );
    }
}
