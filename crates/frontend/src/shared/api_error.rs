use thiserror::Error;

/// Failure of a backend call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Message shown to the user in banners and notifications
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Unable to reach the vendor data service. Check that the backend is running."
                    .to_string()
            }
            ApiError::Http { status, .. } if *status == 404 => {
                "The requested vendor data was not found.".to_string()
            }
            ApiError::Http { status, .. } => {
                format!("The vendor data service returned HTTP {}.", status)
            }
            ApiError::Parse(_) => {
                "The vendor data service returned an unexpected response.".to_string()
            }
            ApiError::InvalidRequest(msg) => msg.clone(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ApiError::Http {
            status: 503,
            url: "http://localhost:8000/api/vendors".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from http://localhost:8000/api/vendors");
        assert_eq!(err.user_message(), "The vendor data service returned HTTP 503.");
    }

    #[test]
    fn test_user_message() {
        assert!(ApiError::Network("x".into()).is_network());
        assert_eq!(
            ApiError::InvalidRequest("at least one symbol is required".into()).user_message(),
            "at least one symbol is required"
        );
        assert_eq!(
            ApiError::Http { status: 404, url: String::new() }.user_message(),
            "The requested vendor data was not found."
        );
    }
}
