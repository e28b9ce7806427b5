use crate::shared::api_error::ApiError;
use crate::shared::api_utils::ApiConfig;
use contracts::dashboards::d400_vendor_comparison::PortfolioKpis;
use contracts::domain::a001_vendor::{
    normalize_vendor, parse_vendor_list, VendorRecord, VendorRefreshResponse,
};
use contracts::system::sys_cache::dto::{
    preload_symbols, CacheOptimizeResponse, CachePreloadResponse, CacheStatus,
    ClearExpiredResponse,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

// ============================================================================
// Helpers
// ============================================================================

fn check_status(response: &Response, url: &str) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Http {
            status: response.status(),
            url: url.to_string(),
        })
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(&response, url)?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

async fn post_json<T: DeserializeOwned>(url: &str, body: Option<&Value>) -> Result<T, ApiError> {
    let builder = Request::post(url);
    let response = match body {
        Some(body) => builder
            .json(body)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(&response, url)?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

// ============================================================================
// Vendors & portfolio
// ============================================================================

/// `GET /vendors`, normalized. A payload of the wrong shape is a `Parse` error.
pub async fn fetch_vendors(config: &ApiConfig) -> Result<Vec<VendorRecord>, ApiError> {
    let body: Value = get_json(&config.url("/vendors")).await?;
    parse_vendor_list(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

pub async fn fetch_portfolio_kpis(config: &ApiConfig) -> Result<PortfolioKpis, ApiError> {
    let body: Value = get_json(&config.url("/portfolio/kpis")).await?;
    Ok(PortfolioKpis::from_json(&body))
}

/// `GET /vendors/{symbol}`, normalized
pub async fn fetch_vendor_detail(
    config: &ApiConfig,
    symbol: &str,
) -> Result<VendorRecord, ApiError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ApiError::InvalidRequest("vendor symbol is empty".to_string()));
    }
    let url = config.url(&format!("/vendors/{}", urlencoding::encode(symbol)));
    let body: Value = get_json(&url).await?;
    Ok(normalize_vendor(&body))
}

/// `GET /vendors/{symbol}/refresh`: drop and rebuild the backend cache for one vendor
pub async fn refresh_vendor(
    config: &ApiConfig,
    symbol: &str,
) -> Result<VendorRefreshResponse, ApiError> {
    let url = config.url(&format!("/vendors/{}/refresh", urlencoding::encode(symbol.trim())));
    get_json(&url).await
}

/// `GET /export/csv` as text
pub async fn export_csv(config: &ApiConfig) -> Result<String, ApiError> {
    let url = config.url("/export/csv");
    let response = Request::get(&url)
        .header("Accept", "text/csv")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(&response, &url)?;
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(ApiError::Parse("empty CSV export".to_string()));
    }
    Ok(text)
}

// ============================================================================
// Cache
// ============================================================================

pub async fn fetch_cache_status(config: &ApiConfig) -> Result<CacheStatus, ApiError> {
    get_json(&config.url("/cache/status")).await
}

pub async fn optimize_cache(config: &ApiConfig) -> Result<CacheOptimizeResponse, ApiError> {
    post_json(&config.url("/cache/optimize"), None).await
}

/// `POST /cache/preload` with 1 to 10 symbols
pub async fn preload_cache(
    config: &ApiConfig,
    symbols: &[String],
) -> Result<CachePreloadResponse, ApiError> {
    let symbols = preload_symbols(symbols).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let body = Value::from(symbols);
    post_json(&config.url("/cache/preload"), Some(&body)).await
}

pub async fn clear_expired_cache(config: &ApiConfig) -> Result<ClearExpiredResponse, ApiError> {
    post_json(&config.url("/cache/clear-expired"), None).await
}
