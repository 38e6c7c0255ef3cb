//! Callback server configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;
/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1_048_576;
/// Default number of events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Configuration for the callback server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackServerConfig {
    /// Address the listener binds to.
    pub addr: SocketAddr,
    /// Largest accepted request body; bigger bodies get HTTP 413.
    pub max_body_size: usize,
    /// Events buffered per subscriber before it starts lagging.
    pub event_capacity: usize,
}

impl Default for CallbackServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl CallbackServerConfig {
    /// Create a new builder for CallbackServerConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zenvia_sms::callbacks::CallbackServerConfig;
    ///
    /// let config = CallbackServerConfig::builder()
    ///     .port(81)
    ///     .max_body_size(64 * 1024)
    ///     .build();
    ///
    /// assert_eq!(config.addr.port(), 81);
    /// assert_eq!(config.max_body_size, 64 * 1024);
    /// ```
    pub fn builder() -> CallbackServerConfigBuilder {
        CallbackServerConfigBuilder::default()
    }

    /// Same config listening on `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }
}

/// Builder for CallbackServerConfig.
#[derive(Debug, Clone, Default)]
pub struct CallbackServerConfigBuilder {
    config: CallbackServerConfig,
}

impl CallbackServerConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listening port, keeping the bind address.
    ///
    /// Default: 8080. Use 0 to let the OS pick a free port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.addr.set_port(port);
        self
    }

    /// Set the full listening address.
    ///
    /// Default: `0.0.0.0:8080`
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.config.addr = addr;
        self
    }

    /// Set the request body limit.
    ///
    /// Default: 1 MiB
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set the per-subscriber event buffer. Values below 1 are raised to 1.
    ///
    /// Default: 256
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity.max(1);
        self
    }

    /// Build the CallbackServerConfig.
    pub fn build(self) -> CallbackServerConfig {
        self.config
    }
}
