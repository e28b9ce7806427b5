//! API configuration for frontend-backend communication
//!
//! The backend base URL and the cache health interval are fixed at build
//! time (`VENDOR_API_BASE_URL`, `VENDOR_CACHE_CHECK_SECS`). Without them the
//! documented defaults apply. The resolved config is provided to components
//! through Leptos context.

use leptos::prelude::*;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_CACHE_CHECK_SECS: u32 = 300;

/// Minimum interval for the background cache check
const MIN_CACHE_CHECK_SECS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. "http://localhost:8000/api"
    pub base_url: String,
    pub cache_check_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            cache_check_secs: DEFAULT_CACHE_CHECK_SECS,
        }
    }
}

impl ApiConfig {
    /// Config baked in at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("VENDOR_API_BASE_URL"),
            option_env!("VENDOR_CACHE_CHECK_SECS"),
        )
    }

    pub fn from_values(base_url: Option<&str>, cache_check_secs: Option<&str>) -> Self {
        let base_url = base_url
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string();
        let cache_check_secs = cache_check_secs
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|secs| secs.max(MIN_CACHE_CHECK_SECS))
            .unwrap_or(DEFAULT_CACHE_CHECK_SECS);
        Self {
            base_url,
            cache_check_secs,
        }
    }

    /// Build a full API URL from a path such as "/vendors"
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn cache_check_millis(&self) -> u32 {
        self.cache_check_secs.saturating_mul(1000)
    }
}

/// Config from context, falling back to the build-time config
pub fn use_api_config() -> ApiConfig {
    use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_build_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_values(None, None);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.url("/vendors"), "http://localhost:8000/api/vendors");
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = ApiConfig::from_values(Some(" https://vendors.example.com/api/ "), Some("60"));
        assert_eq!(config.base_url, "https://vendors.example.com/api");
        assert_eq!(config.url("cache/status"), "https://vendors.example.com/api/cache/status");
        assert_eq!(config.cache_check_secs, 60);
        assert_eq!(config.cache_check_millis(), 60_000);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ApiConfig::from_values(Some("  "), Some("soon"));
        assert_eq!(config, ApiConfig::default());
        assert_eq!(ApiConfig::from_values(None, Some("1")).cache_check_secs, 10);
    }
}
