//! Zenvia REST endpoint table.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::fmt::{self, Display, Formatter};

/// Default Zenvia REST API host.
pub const DEFAULT_API_URL: &str = "https://api-rest.zenvia.com";

/// Logical operations exposed by the Zenvia REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Send a single SMS.
    SendSms,
    /// Send a batch of SMS in one request.
    SendSmsMultiple,
    /// Query delivery status of a message (id appended).
    GetSmsStatus,
    /// List received messages not yet fetched.
    ReceivedList,
    /// Search received messages by period (start and end appended).
    ReceivedSearch,
    /// Cancel a scheduled message (id appended).
    CancelSms,
}

impl Endpoint {
    /// All endpoints, in table order.
    pub const ALL: [Endpoint; 6] = [
        Self::SendSms,
        Self::SendSmsMultiple,
        Self::GetSmsStatus,
        Self::ReceivedList,
        Self::ReceivedSearch,
        Self::CancelSms,
    ];

    /// Path relative to the API host, without trailing parameters.
    pub fn path(&self) -> &'static str {
        match self {
            Self::SendSms => "/services/send-sms",
            Self::SendSmsMultiple => "/services/send-sms-multiple",
            Self::GetSmsStatus => "/services/get-sms-status",
            Self::ReceivedList => "/services/received/list",
            Self::ReceivedSearch => "/services/received/search",
            Self::CancelSms => "/services/cancel-sms",
        }
    }

    /// HTTP method used for this endpoint.
    pub fn method(&self) -> Method {
        match self {
            Self::GetSmsStatus | Self::ReceivedSearch => Method::GET,
            Self::SendSms | Self::SendSmsMultiple | Self::ReceivedList | Self::CancelSms => {
                Method::POST
            }
        }
    }

    /// Number of path parameters appended after [`Endpoint::path`].
    pub fn param_count(&self) -> usize {
        match self {
            Self::GetSmsStatus | Self::CancelSms => 1,
            Self::ReceivedSearch => 2,
            Self::SendSms | Self::SendSmsMultiple | Self::ReceivedList => 0,
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Headers attached to every outbound request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}
