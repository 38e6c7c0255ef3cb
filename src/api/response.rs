//! Normalized `{statusCode, body}` responses.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Body placed in the normalized response for HTTP 401.
pub const BAD_CREDENTIALS_BODY: &str = "Bad credentials";

/// Response body as returned by the gateway.
///
/// JSON payloads are parsed; anything else (including an empty body) is kept
/// as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Interpret raw response text.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text.to_string()),
        }
    }

    /// JSON payload, if the body was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Text payload, if the body was not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Normalized gateway response.
///
/// `body` is the literal [`BAD_CREDENTIALS_BODY`] string if and only if
/// `status_code` is 401.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code of the transport response.
    pub status_code: u16,
    /// Parsed response payload.
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Build the normalized response from a status code and raw body text.
    pub fn normalize(status_code: u16, text: &str) -> Self {
        if status_code == 401 {
            return Self::bad_credentials();
        }

        Self {
            status_code,
            body: ResponseBody::from_text(text),
        }
    }

    /// The fixed response reported for HTTP 401.
    pub fn bad_credentials() -> Self {
        Self {
            status_code: 401,
            body: ResponseBody::Text(BAD_CREDENTIALS_BODY.to_string()),
        }
    }

    /// Returns true if the gateway answered with HTTP 200.
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Deserialize the JSON body into a typed envelope.
    ///
    /// Text bodies are decoded as a JSON string, which fails for any struct
    /// envelope.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.body {
            ResponseBody::Json(value) => T::deserialize(value),
            ResponseBody::Text(text) => T::deserialize(Value::String(text.clone())),
        }
    }
}
