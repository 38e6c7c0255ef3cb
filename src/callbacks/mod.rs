//! Receiver for Zenvia callback notifications.
//!
//! Zenvia calls back an HTTP endpoint with two kinds of JSON bodies:
//!
//! - `callbackMtRequest`: delivery status of a sent message
//!   ([`CallbackPayload::DeliveryStatus`]),
//! - `callbackMoRequest`: message received from a handset
//!   ([`CallbackPayload::ReceivedMessage`]).
//!
//! The server answers every `GET /` or `POST /` with an empty `200` and
//! publishes the body as a [`CallbackEvent`] to every subscriber.

mod config;
mod error;
mod events;
mod handlers;
mod router;
mod server;

pub use config::{
    CallbackServerConfig, CallbackServerConfigBuilder, DEFAULT_EVENT_CAPACITY,
    DEFAULT_MAX_BODY_SIZE, DEFAULT_PORT,
};
pub use error::CallbackServerError;
pub use events::{CallbackEvent, CallbackPayload, DeliveryStatus, EventHub, ReceivedSms};
pub use server::{CallbackServer, CallbackServerHandle};
