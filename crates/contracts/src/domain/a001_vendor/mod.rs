pub mod aggregate;
pub mod dto;
pub mod metric_source;
pub mod normalizer;

pub use aggregate::{BalanceSheet, DebtEquityBucket, VendorRecord};
pub use dto::VendorRefreshResponse;
pub use normalizer::{normalize_all, normalize_vendor, parse_vendor_list};
