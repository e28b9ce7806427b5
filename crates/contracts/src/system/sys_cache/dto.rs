use crate::shared::lenient::{de_bool, de_count, de_f64, de_string, de_string_list};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Upper bound accepted by `POST /cache/preload`
pub const MAX_PRELOAD_SYMBOLS: usize = 10;

/// `cache_metrics` block shared by status and optimize replies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheMetrics {
    #[serde(deserialize_with = "de_count")]
    pub total_cached_items: u64,
    #[serde(deserialize_with = "de_count")]
    pub expired_items: u64,
    #[serde(deserialize_with = "de_f64")]
    pub cache_freshness_percentage: f64,
    #[serde(deserialize_with = "de_f64")]
    pub average_cache_age_hours: f64,
    #[serde(deserialize_with = "de_bool")]
    pub optimization_needed: bool,
}

/// `GET /cache/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheStatus {
    #[serde(deserialize_with = "de_string")]
    pub status: String,
    pub cache_metrics: CacheMetrics,
    #[serde(deserialize_with = "de_string_list")]
    pub recommendations: Vec<String>,
}

impl CacheStatus {
    pub fn needs_optimization(&self) -> bool {
        self.cache_metrics.optimization_needed
    }
}

/// `POST /cache/optimize`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptimizeResponse {
    #[serde(deserialize_with = "de_string")]
    pub status: String,
    #[serde(deserialize_with = "de_string")]
    pub message: String,
    #[serde(deserialize_with = "de_bool")]
    pub background_tasks_started: bool,
    pub cache_metrics: CacheMetrics,
}

/// `POST /cache/preload`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachePreloadResponse {
    #[serde(deserialize_with = "de_string")]
    pub status: String,
    #[serde(deserialize_with = "de_string")]
    pub message: String,
    #[serde(deserialize_with = "de_string_list")]
    pub symbols: Vec<String>,
    #[serde(deserialize_with = "de_f64")]
    pub estimated_completion_minutes: f64,
}

/// `POST /cache/clear-expired`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearExpiredResponse {
    #[serde(deserialize_with = "de_string")]
    pub status: String,
    #[serde(deserialize_with = "de_string")]
    pub message: String,
    #[serde(deserialize_with = "de_count")]
    pub entries_cleared: u64,
    #[serde(deserialize_with = "de_bool")]
    pub space_optimized: bool,
}

/// Trim, uppercase and de-duplicate symbols for a preload request.
/// Fails outside 1..=10 symbols, which the backend rejects anyway.
pub fn preload_symbols<S: AsRef<str>>(symbols: &[S]) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for s in symbols {
        let symbol = s.as_ref().trim().to_uppercase();
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    if out.is_empty() {
        bail!("at least one symbol is required for preloading");
    }
    if out.len() > MAX_PRELOAD_SYMBOLS {
        bail!(
            "at most {} symbols can be preloaded, got {}",
            MAX_PRELOAD_SYMBOLS,
            out.len()
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_status_parses_backend_reply() {
        let status: CacheStatus = serde_json::from_value(json!({
            "status": "success",
            "cache_metrics": {
                "total_cached_items": 40,
                "expired_items": 12.0,
                "cache_freshness_percentage": "65.5",
                "average_cache_age_hours": 18.2,
                "optimization_needed": true
            },
            "recommendations": ["Cache freshness is low - consider running cache optimization"]
        }))
        .expect("status");
        assert_eq!(status.cache_metrics.expired_items, 12);
        assert_eq!(status.cache_metrics.cache_freshness_percentage, 65.5);
        assert!(status.needs_optimization());
        assert_eq!(status.recommendations.len(), 1);
    }

    #[test]
    fn test_cache_status_tolerates_missing_and_null() {
        let status: CacheStatus = serde_json::from_value(json!({
            "cache_metrics": { "total_cached_items": null, "optimization_needed": "yes" },
            "recommendations": null
        }))
        .expect("status");
        assert_eq!(status, CacheStatus::default());
    }

    #[test]
    fn test_clear_expired_response() {
        let resp: ClearExpiredResponse = serde_json::from_value(json!({
            "status": "success",
            "message": "Cleared 3 expired cache entries",
            "entries_cleared": 3,
            "space_optimized": true
        }))
        .expect("clear");
        assert_eq!(resp.entries_cleared, 3);
        assert!(resp.space_optimized);
    }

    #[test]
    fn test_preload_symbols_bounds() {
        assert_eq!(
            preload_symbols(&[" tel", "TEL", "dd"]).expect("valid"),
            vec!["TEL".to_string(), "DD".to_string()]
        );
        assert!(preload_symbols::<&str>(&[]).is_err());
        assert!(preload_symbols(&["  "]).is_err());
        let many: Vec<String> = (0..11).map(|i| format!("S{i}")).collect();
        assert!(preload_symbols(&many).is_err());
    }
}
