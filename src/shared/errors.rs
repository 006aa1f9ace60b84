use thiserror::Error;

/// Failures of the portal's remote operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (fetch rejected, connection reset, stream broken)
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Error HTTP: {status} {message}")]
    HttpError { status: u16, message: String },

    /// Well-formed response without a usable record
    #[error("No details found")]
    NotFound,

    #[error("Render failure: {0}")]
    RenderFailure(String),

    #[error("Invalid response payload: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ApiError::HttpError {
            status,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Client storage unavailable")]
    Unavailable,

    #[error("Failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = ApiError::http(500, "Internal Server Error");
        assert_eq!(err.to_string(), "Error HTTP: 500 Internal Server Error");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_ne!(err, ApiError::NotFound);
    }
}
