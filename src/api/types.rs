//! Request payloads and typed response envelopes for the Zenvia REST API.

use super::endpoints::Endpoint;
use crate::types::{CallbackOption, SmsId, SmsStatusCode};
use serde::{Deserialize, Serialize};

// =============================================================================
// Requests
// =============================================================================

/// A single SMS message.
///
/// # Example
///
/// ```rust
/// use zenvia_sms::{CallbackOption, SmsMessage};
///
/// let message = SmsMessage::new("5551999999999", "Hello from Rust")
///     .with_from("Zenvia")
///     .with_id("001")
///     .with_callback_option(CallbackOption::All);
///
/// assert_eq!(message.to, "5551999999999");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsMessage {
    /// Sender shown to the recipient (optional, operator dependent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Recipient number with country and area code, digits only.
    pub to: String,
    /// Local date-time to send at, formatted `yyyy-MM-ddTHH:mm:ss`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Message text.
    pub msg: String,
    /// Delivery-status callbacks requested for this message.
    #[serde(default)]
    pub callback_option: CallbackOption,
    /// Caller-chosen unique id used for status queries and cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SmsId>,
    /// Groups messages for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_id: Option<String>,
    /// Display the message immediately without storing it on the handset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_sms: Option<bool>,
}

impl SmsMessage {
    /// Create a message for `to` with text `msg`.
    pub fn new(to: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
            schedule: None,
            msg: msg.into(),
            callback_option: CallbackOption::default(),
            id: None,
            aggregate_id: None,
            flash_sms: None,
        }
    }

    /// Set the sender.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Schedule the message (`yyyy-MM-ddTHH:mm:ss`).
    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }

    /// Set the callback option.
    pub fn with_callback_option(mut self, option: CallbackOption) -> Self {
        self.callback_option = option;
        self
    }

    /// Set the message id.
    pub fn with_id(mut self, id: impl Into<SmsId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the aggregate id.
    pub fn with_aggregate_id(mut self, aggregate_id: impl Into<String>) -> Self {
        self.aggregate_id = Some(aggregate_id.into());
        self
    }

    /// Send as a flash SMS.
    pub fn with_flash_sms(mut self, flash: bool) -> Self {
        self.flash_sms = Some(flash);
        self
    }
}

/// A batch of messages sent in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsBatch {
    /// Groups the whole batch for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_id: Option<String>,
    /// Messages of the batch.
    #[serde(rename = "sendSmsRequestList")]
    pub messages: Vec<SmsMessage>,
}

impl SmsBatch {
    /// Create a batch from messages.
    pub fn new(messages: impl IntoIterator<Item = SmsMessage>) -> Self {
        Self {
            aggregate_id: None,
            messages: messages.into_iter().collect(),
        }
    }

    /// Set the aggregate id for the batch.
    pub fn with_aggregate_id(mut self, aggregate_id: impl Into<String>) -> Self {
        self.aggregate_id = Some(aggregate_id.into());
        self
    }
}

/// Payload of a send request.
///
/// The variant decides the target endpoint: [`SendSms::Single`] goes to
/// `/services/send-sms`, [`SendSms::Multi`] to `/services/send-sms-multiple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SendSms {
    /// Serialized as `{"sendSmsRequest": {...}}`.
    #[serde(rename = "sendSmsRequest")]
    Single(SmsMessage),
    /// Serialized as `{"sendSmsMultiRequest": {...}}`.
    #[serde(rename = "sendSmsMultiRequest")]
    Multi(SmsBatch),
}

impl SendSms {
    /// Endpoint this payload is posted to.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Single(_) => Endpoint::SendSms,
            Self::Multi(_) => Endpoint::SendSmsMultiple,
        }
    }

    /// Number of messages in the payload.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(batch) => batch.messages.len(),
        }
    }

    /// Returns true for a batch without messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<SmsMessage> for SendSms {
    fn from(message: SmsMessage) -> Self {
        Self::Single(message)
    }
}

impl From<SmsBatch> for SendSms {
    fn from(batch: SmsBatch) -> Self {
        Self::Multi(batch)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Status block shared by every Zenvia response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status_code: SmsStatusCode,
    #[serde(default)]
    pub status_description: Option<String>,
    #[serde(default)]
    pub detail_code: Option<String>,
    #[serde(default)]
    pub detail_description: Option<String>,
}

/// Part of a long message split by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    pub part_id: String,
    pub order: u32,
}

/// Result of sending a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsResult {
    #[serde(flatten)]
    pub status: StatusReport,
    /// Present when the message was split into several parts.
    #[serde(default)]
    pub parts: Option<Vec<MessagePart>>,
}

impl std::ops::Deref for SendSmsResult {
    type Target = StatusReport;

    fn deref(&self) -> &Self::Target {
        &self.status
    }
}

/// Body of `/services/send-sms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsEnvelope {
    pub send_sms_response: SendSmsResult,
}

/// Per-message results of a batch send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsMultiResult {
    #[serde(default)]
    pub send_sms_response_list: Vec<SendSmsResult>,
}

/// Body of `/services/send-sms-multiple`.
///
/// A batch answered with HTTP 200 can still carry per-message errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsMultiEnvelope {
    pub send_sms_multi_response: SendSmsMultiResult,
}

impl SendSmsMultiEnvelope {
    /// Results whose status is `10` (Error).
    pub fn failures(&self) -> impl Iterator<Item = &SendSmsResult> {
        self.send_sms_multi_response
            .send_sms_response_list
            .iter()
            .filter(|result| result.status_code == SmsStatusCode::Error)
    }
}

/// Delivery status of a previously sent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsStatus {
    #[serde(default)]
    pub id: Option<SmsId>,
    /// When the handset received the message.
    #[serde(default)]
    pub received: Option<String>,
    #[serde(default)]
    pub shortcode: Option<String>,
    #[serde(default)]
    pub mobile_operator_name: Option<String>,
    #[serde(flatten)]
    pub status: StatusReport,
}

/// Body of `/services/get-sms-status/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsStatusEnvelope {
    pub get_sms_status_resp: SmsStatus,
}

/// Body of `/services/cancel-sms/{id}`.
///
/// A cancelled message reports status `09` (Blocked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelSmsEnvelope {
    pub cancel_sms_resp: StatusReport,
}

/// Message received from a handset (MO).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedMessage {
    pub id: String,
    #[serde(default)]
    pub date_received: Option<String>,
    pub mobile: String,
    pub body: String,
    #[serde(default)]
    pub shortcode: Option<String>,
    #[serde(default)]
    pub mobile_operator_name: Option<String>,
    /// Id of the sent message this one replies to.
    #[serde(default)]
    pub sms_origin_id: Option<String>,
}

/// Received messages with the status block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedList {
    #[serde(flatten)]
    pub status: StatusReport,
    #[serde(default)]
    pub received_messages: Vec<ReceivedMessage>,
}

/// Body of the received-list and received-search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedEnvelope {
    pub received_response: ReceivedList,
}
