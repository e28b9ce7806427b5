use serde::{Deserialize, Serialize};

/// Coarse risk bucket derived from a 0-100 risk score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    pub fn code(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn all() -> Vec<RiskLevel> {
        vec![RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// Higher combined scores mean healthier vendors, hence lower risk.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            RiskLevel::Low
        } else if score >= 55.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Fixed badge palette
    pub fn badge_color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "emerald",
            RiskLevel::Medium => "amber",
            RiskLevel::High => "red",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-badge risk-badge--emerald",
            RiskLevel::Medium => "risk-badge risk-badge--amber",
            RiskLevel::High => "risk-badge risk-badge--red",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_score_boundaries() {
        assert_eq!(RiskLevel::from_score(75.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(74.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(55.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(54.0), RiskLevel::High);
    }

    #[test]
    fn test_badge_colors_are_fixed() {
        assert_eq!(RiskLevel::Low.badge_color(), "emerald");
        assert_eq!(RiskLevel::Medium.badge_color(), "amber");
        assert_eq!(RiskLevel::High.badge_color(), "red");
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(RiskLevel::default(), RiskLevel::Medium);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(RiskLevel::from_code("HIGH"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::from_code("severe"), None);
    }
}
