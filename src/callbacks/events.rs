//! Callback events and their fan-out to subscribers.

use crate::types::{SmsId, SmsStatusCode};
use axum::http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Delivery-status notification (`callbackMtRequest`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStatus {
    /// Id given to the message when it was sent.
    pub id: SmsId,
    pub status: SmsStatusCode,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub status_detail: Option<String>,
    #[serde(default)]
    pub status_detail_message: Option<String>,
    #[serde(default)]
    pub received: Option<String>,
    #[serde(default)]
    pub mobile_operator_name: Option<String>,
}

/// Received-message notification (`callbackMoRequest`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedSms {
    pub id: String,
    pub mobile: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    pub body: String,
    #[serde(default)]
    pub received: Option<String>,
    /// Id of the sent message this one answers.
    #[serde(default)]
    pub correlated_message_sms_id: Option<String>,
}

/// Typed view of a callback body.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackPayload {
    DeliveryStatus(DeliveryStatus),
    ReceivedMessage(ReceivedSms),
    /// Body that matches neither known shape.
    Unknown(Value),
}

/// One inbound callback request.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackEvent {
    /// HTTP method the gateway used.
    pub method: Method,
    /// Request body, unmodified when it was JSON.
    pub body: Value,
}

impl CallbackEvent {
    /// Create an event.
    pub fn new(method: Method, body: Value) -> Self {
        Self { method, body }
    }

    /// Decode the body into a known callback shape.
    pub fn payload(&self) -> CallbackPayload {
        if let Some(inner) = self.body.get("callbackMtRequest")
            && let Ok(status) = DeliveryStatus::deserialize(inner)
        {
            return CallbackPayload::DeliveryStatus(status);
        }

        if let Some(inner) = self.body.get("callbackMoRequest")
            && let Ok(message) = ReceivedSms::deserialize(inner)
        {
            return CallbackPayload::ReceivedMessage(message);
        }

        CallbackPayload::Unknown(self.body.clone())
    }
}

/// Multi-subscriber fan-out of callback events.
///
/// Every subscriber sees every event published after it subscribed. Events
/// published while nobody is subscribed are dropped. A subscriber that falls
/// more than the configured capacity behind receives
/// [`RecvError::Lagged`] and skips the oldest events. Dropping a receiver
/// unsubscribes it.
#[derive(Debug, Clone)]
pub struct EventHub {
    tx: broadcast::Sender<CallbackEvent>,
}

impl EventHub {
    /// Create a hub buffering `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Attach a new subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<CallbackEvent> {
        self.tx.subscribe()
    }

    /// Number of attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish an event, returning how many subscribers will see it.
    pub fn publish(&self, event: CallbackEvent) -> usize {
        match self.tx.send(event) {
            Ok(subscribers) => subscribers,
            Err(_) => {
                #[cfg(feature = "tracing")]
                debug!("No callback subscribers, event dropped");
                0
            }
        }
    }

    /// Run `handler` for every event on a spawned task.
    ///
    /// The task ends once every handle to the hub (server included) is gone.
    /// Abort the returned handle to unsubscribe earlier.
    pub fn on_event<F>(&self, mut handler: F) -> JoinHandle<()>
    where
        F: FnMut(CallbackEvent) + Send + 'static,
    {
        let mut rx = self.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => handler(event),
                    Err(RecvError::Lagged(_skipped)) => {
                        #[cfg(feature = "tracing")]
                        warn!(skipped = _skipped, "Callback handler lagging, events skipped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
