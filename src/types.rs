//! Core types shared by the Zenvia client and callback payloads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

// =============================================================================
// SmsId
// =============================================================================

/// Caller-chosen identifier of an SMS message.
///
/// Zenvia uses this id to report delivery status, to query status and to
/// cancel scheduled messages, so it must be unique per account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SmsId(String);

impl SmsId {
    /// Create a new SmsId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SmsId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SmsId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SmsId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SmsId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// CallbackOption
// =============================================================================

/// Which delivery-status callbacks the gateway should send for a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallbackOption {
    /// No status callbacks.
    #[default]
    None,
    /// Only the final status (delivered or not delivered).
    Final,
    /// Every status transition.
    All,
}

impl Display for CallbackOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Final => write!(f, "FINAL"),
            Self::All => write!(f, "ALL"),
        }
    }
}

// =============================================================================
// SmsStatusCode
// =============================================================================

/// Status codes used by Zenvia in responses and delivery callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SmsStatusCode {
    /// `00`: request accepted.
    Ok,
    /// `01`: message scheduled.
    Scheduled,
    /// `02`: message sent to the operator.
    Sent,
    /// `03`: message delivered to the handset.
    Delivered,
    /// `04`: message not received by the handset.
    NotReceived,
    /// `05`: blocked, no coverage.
    BlockedNoCoverage,
    /// `06`: blocked, number is blacklisted.
    BlockedBlacklisted,
    /// `07`: blocked, invalid number.
    BlockedInvalidNumber,
    /// `08`: blocked, content not allowed.
    BlockedContentNotAllowed,
    /// `09`: blocked (also returned for cancelled messages).
    Blocked,
    /// `10`: request error.
    Error,
    /// Code not known to this crate.
    Unknown { raw: String },
}

impl SmsStatusCode {
    /// Returns the two-digit wire representation.
    pub fn code(&self) -> &str {
        match self {
            Self::Ok => "00",
            Self::Scheduled => "01",
            Self::Sent => "02",
            Self::Delivered => "03",
            Self::NotReceived => "04",
            Self::BlockedNoCoverage => "05",
            Self::BlockedBlacklisted => "06",
            Self::BlockedInvalidNumber => "07",
            Self::BlockedContentNotAllowed => "08",
            Self::Blocked => "09",
            Self::Error => "10",
            Self::Unknown { raw } => raw.as_str(),
        }
    }

    /// Returns the description Zenvia pairs with this code.
    pub fn description(&self) -> String {
        match self {
            Self::Ok => "Ok".to_string(),
            Self::Scheduled => "Scheduled".to_string(),
            Self::Sent => "Sent".to_string(),
            Self::Delivered => "Delivered".to_string(),
            Self::NotReceived => "Not Received".to_string(),
            Self::BlockedNoCoverage => "Blocked - No Coverage".to_string(),
            Self::BlockedBlacklisted => "Blocked - Black listed".to_string(),
            Self::BlockedInvalidNumber => "Blocked - Invalid Number".to_string(),
            Self::BlockedContentNotAllowed => "Blocked - Content not allowed".to_string(),
            Self::Blocked => "Blocked".to_string(),
            Self::Error => "Error".to_string(),
            Self::Unknown { raw } => format!("Unknown status: {}", raw),
        }
    }

    /// Parse a status code from its wire representation.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "00" => Self::Ok,
            "01" => Self::Scheduled,
            "02" => Self::Sent,
            "03" => Self::Delivered,
            "04" => Self::NotReceived,
            "05" => Self::BlockedNoCoverage,
            "06" => Self::BlockedBlacklisted,
            "07" => Self::BlockedInvalidNumber,
            "08" => Self::BlockedContentNotAllowed,
            "09" => Self::Blocked,
            "10" => Self::Error,
            other => Self::Unknown {
                raw: other.to_string(),
            },
        }
    }

    /// Returns true for the blocked family (`05` to `09`).
    pub fn is_blocked(&self) -> bool {
        matches!(
            self,
            Self::BlockedNoCoverage
                | Self::BlockedBlacklisted
                | Self::BlockedInvalidNumber
                | Self::BlockedContentNotAllowed
                | Self::Blocked
        )
    }

    /// Returns true if the message will not progress any further.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered | Self::NotReceived | Self::Error) || self.is_blocked()
    }
}

impl Display for SmsStatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for SmsStatusCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for SmsStatusCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&s))
    }
}
