mod cache_status;
mod dashboard;
mod kpi_cards;
mod notifications;
mod recommendations_panel;
mod risk_panel;
mod vendor_detail;
mod vendor_table;
pub mod view_model;

pub use dashboard::VendorComparisonDashboard;
