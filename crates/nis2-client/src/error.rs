//! Compliance API client error types.

/// Errors from compliance-analysis backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ComplianceApiError {
    /// HTTP transport error (connection refused, timeout, TLS failure).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("compliance API {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ComplianceApiError {
    /// Whether the failure happened below the HTTP status line: the request
    /// never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// The HTTP status the backend answered with, if it answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
