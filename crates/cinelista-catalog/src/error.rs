use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-success status
    #[error("catalog request to {endpoint} failed with HTTP {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status {
        status: u16,
        endpoint: String,
        message: Option<String>,
    },

    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// HTTP status of the failed response, if the catalog answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Status { status, .. } => Some(*status),
            CatalogError::Transport(e) => e.status().map(|s| s.as_u16()),
            CatalogError::Decode { .. } | CatalogError::InvalidRequest(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = CatalogError::Status {
            status: 404,
            endpoint: "/movie/550".to_string(),
            message: Some("The resource you requested could not be found.".to_string()),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "catalog request to /movie/550 failed with HTTP 404: The resource you requested could not be found."
        );
    }

    #[test]
    fn test_status_error_without_message() {
        let err = CatalogError::Status {
            status: 401,
            endpoint: "/trending/movie/day".to_string(),
            message: None,
        };
        assert_eq!(err.to_string(), "catalog request to /trending/movie/day failed with HTTP 401");
    }

    #[test]
    fn test_invalid_request_has_no_status() {
        let err = CatalogError::InvalidRequest("empty search query".to_string());
        assert_eq!(err.status(), None);
    }
}
