pub mod industry;
pub mod risk_level;

pub use industry::Industry;
pub use risk_level::RiskLevel;
