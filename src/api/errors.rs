//! Error types for the Zenvia API client.

use super::response::ApiResponse;
use crate::errors::RetryableError;
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Main error type for Zenvia client operations.
#[derive(Debug, Error)]
pub enum ZenviaError {
    /// Failed to build HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Configured host cannot carry path segments (e.g. `mailto:` URLs).
    #[error("Host URL cannot be used as a base for API paths: {host}")]
    InvalidHost { host: url::Url },

    /// Failed to parse a host URL.
    #[error("Invalid host URL: {0}")]
    ParseHost(#[from] url::ParseError),

    /// Required environment variable is missing.
    #[error("Missing environment variable {name}")]
    MissingEnv { name: &'static str },

    /// Failed to send HTTP request (connection, TLS, timeout).
    #[error("Failed to send HTTP request: {0}")]
    HttpRequest(#[from] reqwest_middleware::Error),

    /// Failed to read the response body.
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Gateway answered with HTTP 401.
    #[error("Bad credentials")]
    BadCredentials,

    /// Gateway answered with a status other than 200 and 401.
    #[error("Zenvia gateway returned HTTP {}", .0.status_code)]
    Upstream(ApiResponse),
}

pub type Result<T> = std::result::Result<T, ZenviaError>;

impl ZenviaError {
    /// Map a non-200 normalized response to an error.
    pub(crate) fn from_response(response: ApiResponse) -> Self {
        #[cfg(feature = "tracing")]
        warn!(
            status_code = response.status_code,
            "Zenvia gateway rejected request"
        );

        if response.status_code == 401 {
            Self::BadCredentials
        } else {
            Self::Upstream(response)
        }
    }

    /// Normalized `{statusCode, body}` response carried by this error.
    ///
    /// Returns `None` for failures that happened before a response arrived.
    pub fn response(&self) -> Option<ApiResponse> {
        match self {
            Self::BadCredentials => Some(ApiResponse::bad_credentials()),
            Self::Upstream(response) => Some(response.clone()),
            _ => None,
        }
    }

    /// HTTP status code, if the gateway answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::BadCredentials => Some(401),
            Self::Upstream(response) => Some(response.status_code),
            _ => None,
        }
    }

    /// Returns true for connection and timeout failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpRequest(_) | Self::ReadBody(_))
    }
}

impl RetryableError for ZenviaError {
    fn is_retryable(&self) -> bool {
        match self {
            // Transient network errors
            ZenviaError::HttpRequest(_) | ZenviaError::ReadBody(_) => true,
            // Gateway overload or temporary outage
            ZenviaError::Upstream(response) => {
                response.status_code == 429 || response.status_code >= 500
            }
            // Configuration or credential problems
            ZenviaError::BuildHttpClient(_)
            | ZenviaError::InvalidHost { .. }
            | ZenviaError::ParseHost(_)
            | ZenviaError::MissingEnv { .. }
            | ZenviaError::BadCredentials => false,
        }
    }
}
