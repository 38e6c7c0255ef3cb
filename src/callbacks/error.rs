use crate::errors::RetryableError;
use std::io::ErrorKind;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors raised by the callback server.
#[derive(Debug, Error)]
pub enum CallbackServerError {
    /// Listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Fatal I/O error while serving.
    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    /// Server task panicked or was aborted.
    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CallbackServerError>;

impl RetryableError for CallbackServerError {
    fn is_retryable(&self) -> bool {
        match self {
            // Port may be released by the previous owner
            CallbackServerError::Bind { source, .. } => source.kind() == ErrorKind::AddrInUse,
            CallbackServerError::Server(_) | CallbackServerError::Task(_) => false,
        }
    }
}
