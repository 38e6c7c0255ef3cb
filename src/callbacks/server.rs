use std::net::SocketAddr;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::config::CallbackServerConfig;
use super::error::{CallbackServerError, Result};
use super::events::{CallbackEvent, EventHub};
use super::router::build_router;

#[cfg(feature = "tracing")]
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub events: EventHub,
}

/// HTTP server receiving Zenvia delivery-status and received-message
/// callbacks on `/`.
///
/// The server is `Stopped` until [`CallbackServer::start`] binds the listener
/// and returns a [`CallbackServerHandle`] in the `Listening` state. Subscribe
/// before starting to be sure no callback is missed.
///
/// # Example
///
/// ```rust,ignore
/// use zenvia_sms::callbacks::{CallbackPayload, CallbackServer};
///
/// let server = CallbackServer::on_port(8080);
/// let mut events = server.subscribe();
/// let handle = server.start().await?;
///
/// while let Ok(event) = events.recv().await {
///     if let CallbackPayload::DeliveryStatus(status) = event.payload() {
///         println!("{} is now {}", status.id, status.status);
///     }
/// }
///
/// handle.shutdown().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CallbackServer {
    config: CallbackServerConfig,
    events: EventHub,
}

impl CallbackServer {
    #[must_use]
    pub fn new(config: CallbackServerConfig) -> Self {
        let events = EventHub::new(config.event_capacity);
        Self { config, events }
    }

    /// Server listening on `port` on all interfaces with default limits.
    #[must_use]
    pub fn on_port(port: u16) -> Self {
        Self::new(CallbackServerConfig::default().with_port(port))
    }

    pub fn config(&self) -> &CallbackServerConfig {
        &self.config
    }

    /// Event hub shared with the running server.
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CallbackEvent> {
        self.events.subscribe()
    }

    /// See [`EventHub::on_event`]. Must be called inside a Tokio runtime.
    pub fn on_event<F>(&self, handler: F) -> JoinHandle<()>
    where
        F: FnMut(CallbackEvent) + Send + 'static,
    {
        self.events.on_event(handler)
    }

    /// Bind the listener and start serving on a spawned task.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(self) -> Result<CallbackServerHandle> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| CallbackServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| CallbackServerError::Bind { addr, source })?;

        let state = AppState {
            events: self.events.clone(),
        };
        let router = build_router(state, self.config.max_body_size);

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
                .map_err(CallbackServerError::Server)
        });

        #[cfg(feature = "tracing")]
        info!("Zenvia SMS callbacks server listening on http://{}", local_addr);

        Ok(CallbackServerHandle {
            local_addr,
            events: self.events,
            shutdown,
            task,
        })
    }
}

/// Handle to a listening callback server.
///
/// Dropping the handle leaves the server running in the background; call
/// [`CallbackServerHandle::shutdown`] to stop it.
#[derive(Debug)]
pub struct CallbackServerHandle {
    local_addr: SocketAddr,
    events: EventHub,
    shutdown: CancellationToken,
    task: JoinHandle<Result<()>>,
}

impl CallbackServerHandle {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn events(&self) -> &EventHub {
        &self.events
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CallbackEvent> {
        self.events.subscribe()
    }

    pub fn on_event<F>(&self, handler: F) -> JoinHandle<()>
    where
        F: FnMut(CallbackEvent) + Send + 'static,
    {
        self.events.on_event(handler)
    }

    /// Returns false once the server task has ended.
    pub fn is_listening(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop accepting connections, let in-flight requests finish and wait
    /// for the server task.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown.cancel();
        let result = self.task.await?;

        #[cfg(feature = "tracing")]
        info!("Zenvia SMS callbacks server on {} stopped", self.local_addr);

        result
    }

    /// Wait until the server ends on its own (fatal I/O error).
    pub async fn wait(self) -> Result<()> {
        self.task.await?
    }
}
