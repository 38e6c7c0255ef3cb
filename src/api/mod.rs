//! Zenvia REST API client.
//!
//! Each operation maps to exactly one HTTP call:
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | [`ZenviaClient::send_sms`] (single) | POST | `/services/send-sms` |
//! | [`ZenviaClient::send_sms`] (batch) | POST | `/services/send-sms-multiple` |
//! | [`ZenviaClient::get_sms_status`] | GET | `/services/get-sms-status/{id}` |
//! | [`ZenviaClient::get_received_list`] | POST | `/services/received/list` |
//! | [`ZenviaClient::get_received_list_search`] | GET | `/services/received/search/{start}/{end}` |
//! | [`ZenviaClient::cancel_scheduled_sms`] | POST | `/services/cancel-sms/{id}` |
//!
//! # Example
//!
//! ```rust,ignore
//! use zenvia_sms::api::{CancelSmsEnvelope, SendSms, SmsMessage, ZenviaClient};
//! use zenvia_sms::SmsId;
//!
//! let client = ZenviaClient::from_env()?;
//!
//! let message = SmsMessage::new("5551999999999", "See you tomorrow")
//!     .with_id("reminder-42")
//!     .with_schedule("2030-01-01T09:00:00");
//! client.send_sms(&SendSms::from(message)).await?;
//!
//! let response = client.cancel_scheduled_sms(&SmsId::from("reminder-42")).await?;
//! let envelope: CancelSmsEnvelope = response.decode()?;
//! println!("{}", envelope.cancel_sms_resp.status_code);
//! ```

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod errors;
pub mod response;
pub mod types;

// Re-export commonly used types
pub use client::{ZenviaClient, ZenviaClientBuilder};
pub use credentials::Credentials;
pub use endpoints::{DEFAULT_API_URL, Endpoint, default_headers};
pub use errors::ZenviaError;
pub use response::{ApiResponse, BAD_CREDENTIALS_BODY, ResponseBody};
pub use types::{
    CancelSmsEnvelope, MessagePart, ReceivedEnvelope, ReceivedList, ReceivedMessage, SendSms,
    SendSmsEnvelope, SendSmsMultiEnvelope, SendSmsMultiResult, SendSmsResult, SmsBatch,
    SmsMessage, SmsStatus, SmsStatusEnvelope, StatusReport,
};
