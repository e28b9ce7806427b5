use crate::shared::lenient::de_string;
use serde::{Deserialize, Serialize};

/// `GET /vendors/{symbol}/refresh`: cache for one vendor was rebuilt upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorRefreshResponse {
    #[serde(deserialize_with = "de_string")]
    pub message: String,
    #[serde(deserialize_with = "de_string")]
    pub symbol: String,
    #[serde(deserialize_with = "de_string")]
    pub refreshed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_refresh_response() {
        let resp: VendorRefreshResponse = serde_json::from_value(json!({
            "message": "Data refreshed successfully for TEL",
            "symbol": "TEL",
            "refreshedAt": "2024-03-01T09:30:00",
            "riskScores": { "overall": "low" }
        }))
        .expect("refresh");
        assert_eq!(resp.symbol, "TEL");
        assert_eq!(resp.refreshed_at, "2024-03-01T09:30:00");
    }
}
