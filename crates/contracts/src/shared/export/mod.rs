//! Client-side export artifacts: CSV table and plain-text report.

pub mod csv;
pub mod report;

use chrono::NaiveDateTime;

pub use self::csv::{to_csv_string, CsvExportable, VENDOR_CSV_HEADERS};
pub use self::report::generate_text_report;

/// `vendor_comparison_20240131_154500.csv`
pub fn export_filename(generated_at: NaiveDateTime, extension: &str) -> String {
    format!(
        "vendor_comparison_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_filename() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_opt(15, 45, 0))
            .expect("valid timestamp");
        assert_eq!(export_filename(ts, "csv"), "vendor_comparison_20240131_154500.csv");
        assert_eq!(export_filename(ts, "txt"), "vendor_comparison_20240131_154500.txt");
    }
}
