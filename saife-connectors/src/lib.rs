//! Service Connectivity for the SAIFE Client SDK
//!
//! ## Overview
//!
//! This crate layers the pieces that talk to the SAIFE service on top of
//! `saife-core`:
//!
//! - [`Connector`]: the service-side object store a client publishes to
//! - [`RemoteOutputStream`]: an [`OutputStream`](saife_core::OutputStream)
//!   whose destination is a named object behind a connector
//! - [`RetryPolicy`]: exponential backoff for transient outages
//! - [`AttemptLimiter`]: the unlock flow that raises `AdminLocked`
//!
//! ## Failure Mapping
//!
//! Connector failures are classified once, here, and then travel as
//! `saife_core::LibraryError`:
//!
//! ```text
//! ConnectorError::NotConnected ─┐
//! ConnectorError::Timeout ──────┴─► LibraryError::ServiceUnavailable (retryable)
//! ConnectorError::BufferFull ───┐
//! ConnectorError::ProtocolError ┼─► LibraryError::General
//! ConnectorError::ConfigError ──┘
//! ```
//!
//! Inside a stream the same failure is an `io::Error` whose kind keeps the
//! classification (`NotConnected`, `TimedOut`), so converting the stream
//! error back into a `LibraryError` lands on the same variant.
//!
//! ## Example Usage
//!
//! ```rust
//! use saife_connectors::{MemoryConnector, RemoteOutputStream, RetryPolicy};
//! use saife_core::{LibraryError, OutputStream};
//!
//! let mut share = MemoryConnector::new();
//! let policy = RetryPolicy::default();
//!
//! policy.run_with_sleep(|| -> Result<(), LibraryError> {
//!     let mut stream = RemoteOutputStream::new(&mut share, "reports/today.bin");
//!     stream.write_all(b"payload")?;
//!     stream.close()?;
//!     Ok(())
//! }, |_| {})?;
//!
//! assert_eq!(share.object("reports/today.bin"), Some(&b"payload"[..]));
//! # Ok::<(), LibraryError>(())
//! ```

use std::io;

use saife_core::{LibraryError, LibraryResult};
use thiserror::Error;

pub mod config;
pub mod memory;
pub mod remote;
pub mod retry;
pub mod unlock;

// Re-export common types
pub use config::ClientConfig;
pub use memory::MemoryConnector;
pub use remote::RemoteOutputStream;
pub use retry::RetryPolicy;
pub use unlock::{AttemptLimiter, CredentialVerifier};

/// Common connector errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Timeout")]
    Timeout,

    #[error("Buffer full")]
    BufferFull,

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ConnectorError {
    /// Whether the service could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotConnected | Self::Timeout)
    }
}

impl From<ConnectorError> for LibraryError {
    fn from(err: ConnectorError) -> Self {
        if err.is_unavailable() {
            LibraryError::service_unavailable(err.to_string())
        } else {
            LibraryError::new(err.to_string())
        }
    }
}

impl From<ConnectorError> for io::Error {
    fn from(err: ConnectorError) -> Self {
        let kind = match err {
            ConnectorError::NotConnected => io::ErrorKind::NotConnected,
            ConnectorError::Timeout => io::ErrorKind::TimedOut,
            ConnectorError::BufferFull => io::ErrorKind::WriteZero,
            ConnectorError::ProtocolError(_) => io::ErrorKind::InvalidData,
            ConnectorError::ConfigError(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

/// Trait for all service connectors
///
/// `send` stores `data` as the complete object `name`, replacing any
/// previous version, so repeating a send is harmless.
pub trait Connector {
    type Error: Into<LibraryError> + Into<io::Error>;

    /// Store `data` under `name`
    fn send(&mut self, name: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats {
        ConnectionStats::default()
    }
}

impl<C: Connector + ?Sized> Connector for &mut C {
    type Error = C::Error;

    fn send(&mut self, name: &str, data: &[u8]) -> Result<(), Self::Error> {
        (**self).send(name, data)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn stats(&self) -> ConnectionStats {
        (**self).stats()
    }
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Last error message
    pub last_error: Option<String>,
}

/// Fail with `ServiceUnavailable` unless `connector` reports a connection
pub fn ensure_available<C: Connector + ?Sized>(connector: &C) -> LibraryResult<()> {
    if connector.is_connected() {
        Ok(())
    } else {
        log::warn!("SAIFE service is not reachable");
        Err(LibraryError::service_unavailable(
            "unable to connect to the SAIFE service",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saife_core::ErrorKind;

    #[test]
    fn connectivity_errors_are_service_unavailable() {
        let err: LibraryError = ConnectorError::NotConnected.into();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.error(), "Not connected");

        let err: LibraryError = ConnectorError::Timeout.into();
        assert!(err.is_retryable());
    }

    #[test]
    fn other_errors_are_general() {
        let err: LibraryError = ConnectorError::ProtocolError("bad frame".into()).into();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.error(), "Protocol error: bad frame");
    }

    #[test]
    fn io_kind_keeps_classification() {
        let err: io::Error = ConnectorError::NotConnected.into();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);

        let back: LibraryError = saife_core::StreamError::Io(err).into();
        assert!(back.is_service_unavailable());

        let err: io::Error = ConnectorError::BufferFull.into();
        let back: LibraryError = saife_core::StreamError::Io(err).into();
        assert!(!back.is_retryable());
    }

    #[test]
    fn ensure_available_tracks_connection() {
        let mut share = MemoryConnector::new();
        assert!(ensure_available(&share).is_ok());

        share.set_online(false);
        let err = ensure_available(&share).unwrap_err();
        assert!(err.is_service_unavailable());
    }
}
