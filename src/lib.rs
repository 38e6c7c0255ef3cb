//! # Zenvia SMS
//!
//! Client and callback receiver for the Zenvia SMS REST gateway.
//!
//! The crate has two independent parts:
//!
//! - [`api`]: a thin authenticated client. Each operation is one HTTP call
//!   whose answer is normalized into `{statusCode, body}`.
//! - [`callbacks`]: a small HTTP server acknowledging the gateway's
//!   delivery-status and received-message callbacks and fanning them out to
//!   local subscribers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zenvia_sms::{CallbackOption, SendSms, SmsMessage, ZenviaClient, ZenviaError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ZenviaError> {
//!     let client = ZenviaClient::new("account", "password")?;
//!
//!     let message = SmsMessage::new("5551999999999", "Hello from Rust")
//!         .with_from("Zenvia")
//!         .with_id("001")
//!         .with_callback_option(CallbackOption::All);
//!
//!     match client.send_sms(&SendSms::from(message)).await {
//!         Ok(response) => println!("sent: {:?}", response.body),
//!         Err(ZenviaError::BadCredentials) => eprintln!("check account and password"),
//!         Err(e) => eprintln!("failed: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `callbacks` - callback receiver server (enabled by default)
//! - `tracing` - OpenTelemetry tracing instrumentation (enabled by default)

pub mod api;
#[cfg(feature = "callbacks")]
pub mod callbacks;
pub mod errors;
pub mod types;

// Re-export commonly used types at the crate root
pub use api::{ApiResponse, ResponseBody, SendSms, SmsBatch, SmsMessage, ZenviaClient, ZenviaError};
#[cfg(feature = "callbacks")]
pub use callbacks::{CallbackEvent, CallbackPayload, CallbackServer, CallbackServerHandle};
pub use errors::RetryableError;
pub use types::{CallbackOption, SmsId, SmsStatusCode};
