//! Error Types for Stream and Library Failures
//!
//! ## Error Categories
//!
//! The SDK reports two families of failures.
//!
//! ### Stream Failures ([`StreamError`])
//! - `Io`: the destination refused data (disk full, permission revoked, broken pipe)
//! - `Closed`: the stream was used after `close()`
//! - `OutOfRange`: an offset/length pair does not fit inside the caller's buffer
//!
//! ### Library Failures ([`LibraryError`])
//! - `General`: any library operation failed
//! - `AdminLocked`: unlock cannot succeed until an administrator resets the password
//! - `ServiceUnavailable`: the client cannot reach the SAIFE service
//!
//! `LibraryError` is the common currency across the SDK boundary. Every
//! `StreamError` converts into it, so callers that only care about "the
//! library failed" can handle one type.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use saife_core::{ErrorKind, LibraryError};
//!
//! fn handle(err: LibraryError) {
//!     match err.kind() {
//!         ErrorKind::AdminLocked => {
//!             // Same credential will never work, escalate to an administrator
//!         }
//!         ErrorKind::ServiceUnavailable => {
//!             // Back off and try again later
//!         }
//!         ErrorKind::Generic => {
//!             // Log and report
//!             eprintln!("library failure: {}", err.error());
//!         }
//!     }
//! }
//!
//! handle(LibraryError::admin_locked("reset required"));
//! ```

use std::io;

use thiserror_no_std::Error;

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

/// Result type for library-level operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Failures raised by [`OutputStream`](crate::traits::OutputStream) operations
#[derive(Error, Debug)]
pub enum StreamError {
    /// The underlying destination rejected a write or flush
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// The stream has already been closed
    #[error("stream is closed")]
    Closed,

    /// `offset + length` reaches past the end of the buffer
    #[error("range {offset}+{length} exceeds buffer of {size} bytes")]
    OutOfRange {
        /// Requested start position
        offset: usize,
        /// Requested number of bytes
        length: usize,
        /// Actual size of the buffer
        size: usize,
    },
}

impl StreamError {
    /// Whether this is the invalid-state error for a closed stream
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Whether this is an I/O fault from the destination
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Whether this is a bounds violation by the caller
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Carries `Closed` and `OutOfRange` inside the `io::Error` so that
/// `From<io::Error>` can restore them on the way back.
impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Io(e) => e,
            StreamError::Closed => io::Error::new(io::ErrorKind::Other, StreamError::Closed),
            e @ StreamError::OutOfRange { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        let restored = match err.get_ref().and_then(|e| e.downcast_ref::<StreamError>()) {
            Some(StreamError::Closed) => Some(StreamError::Closed),
            Some(StreamError::OutOfRange { offset, length, size }) => Some(StreamError::OutOfRange {
                offset: *offset,
                length: *length,
                size: *size,
            }),
            _ => None,
        };
        restored.unwrap_or_else(|| StreamError::Io(err))
    }
}

/// Classification of a [`LibraryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Plain library failure
    Generic,
    /// Unlock blocked until an administrative password reset
    AdminLocked,
    /// Backing service is unreachable
    ServiceUnavailable,
}

/// Library-level failure carrying a human-readable message
///
/// The message is fixed at construction. Both specialised variants are
/// still a `LibraryError`, so a caller may match broadly on the type or
/// narrowly on the variant:
///
/// ```rust
/// use saife_core::LibraryError;
///
/// let err = LibraryError::admin_locked("reset required");
/// assert_eq!(err.error(), "reset required");
/// assert!(matches!(err, LibraryError::AdminLocked(_)));
/// assert!(!err.is_retryable());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// An operation in the library failed
    #[error("{0}")]
    General(String),

    /// The library cannot be unlocked without a password reset
    #[error("admin locked: {0}")]
    AdminLocked(String),

    /// The client cannot connect to or communicate with the SAIFE service
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl LibraryError {
    /// Generic library failure
    pub fn new(message: impl Into<String>) -> Self {
        Self::General(message.into())
    }

    /// Unlock needs an administrator password reset
    pub fn admin_locked(message: impl Into<String>) -> Self {
        Self::AdminLocked(message.into())
    }

    /// SAIFE service could not be reached
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// The message given at construction
    pub fn error(&self) -> &str {
        match self {
            Self::General(msg) | Self::AdminLocked(msg) | Self::ServiceUnavailable(msg) => msg,
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::General(_) => ErrorKind::Generic,
            Self::AdminLocked(_) => ErrorKind::AdminLocked,
            Self::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// True for [`LibraryError::AdminLocked`]
    pub fn is_admin_locked(&self) -> bool {
        self.kind() == ErrorKind::AdminLocked
    }

    /// True for [`LibraryError::ServiceUnavailable`]
    pub fn is_service_unavailable(&self) -> bool {
        self.kind() == ErrorKind::ServiceUnavailable
    }

    /// Whether retrying the same operation later can succeed
    pub fn is_retryable(&self) -> bool {
        self.is_service_unavailable()
    }
}

/// I/O kinds that mean the far side went away rather than the data was bad
fn is_connectivity(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::NotConnected
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::TimedOut
            | io::ErrorKind::BrokenPipe
    )
}

impl From<StreamError> for LibraryError {
    fn from(err: StreamError) -> Self {
        let err = match err {
            StreamError::Io(e) => StreamError::from(e),
            other => other,
        };
        match &err {
            StreamError::Io(e) if is_connectivity(e.kind()) => {
                Self::ServiceUnavailable(err.to_string())
            }
            _ => Self::General(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_locked_keeps_message_and_base_kind() {
        let err = LibraryError::admin_locked("reset required");
        assert_eq!(err.error(), "reset required");
        assert_eq!(err.kind(), ErrorKind::AdminLocked);

        // Still handled by a catch-all on the base type
        let caught: LibraryResult<()> = Err(err);
        match caught {
            Err(e @ LibraryError::General(_))
            | Err(e @ LibraryError::AdminLocked(_))
            | Err(e @ LibraryError::ServiceUnavailable(_)) => {
                assert_eq!(e.error(), "reset required");
            }
            Ok(()) => panic!("expected error"),
        }
    }

    #[test]
    fn service_unavailable_is_retryable() {
        let err = LibraryError::service_unavailable("proxy down");
        assert!(err.is_service_unavailable());
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "service unavailable: proxy down");

        assert!(!LibraryError::new("boom").is_retryable());
        assert!(!LibraryError::admin_locked("locked").is_retryable());
    }

    #[test]
    fn general_display_is_the_message() {
        assert_eq!(LibraryError::new("unlock failed").to_string(), "unlock failed");
    }

    #[test]
    fn stream_error_conversion() {
        let lib: LibraryError = StreamError::Closed.into();
        assert_eq!(lib, LibraryError::General("stream is closed".into()));

        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let lib: LibraryError = StreamError::Io(io_err).into();
        assert!(lib.is_service_unavailable());

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read only");
        let lib: LibraryError = StreamError::Io(io_err).into();
        assert_eq!(lib.kind(), ErrorKind::Generic);
    }

    #[test]
    fn stream_error_into_io() {
        let err: io::Error = StreamError::OutOfRange { offset: 4, length: 8, size: 10 }.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "range 4+8 exceeds buffer of 10 bytes");

        let err: io::Error = StreamError::Closed.into();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn io_round_trip_restores_stream_errors() {
        let io_err: io::Error = StreamError::Closed.into();
        assert!(StreamError::from(io_err).is_closed());

        let io_err: io::Error = StreamError::OutOfRange { offset: 1, length: 2, size: 2 }.into();
        match StreamError::from(io_err) {
            StreamError::OutOfRange { offset, length, size } => {
                assert_eq!((offset, length, size), (1, 2, 2));
            }
            other => panic!("unexpected error: {other}"),
        }

        let plain = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        assert!(StreamError::from(plain).is_io());
    }

    #[test]
    fn closed_stream_is_never_service_unavailable() {
        // Closed wrapped as an io::Error by an io::Write adapter
        let wrapped = StreamError::Io(StreamError::Closed.into());
        let lib: LibraryError = wrapped.into();
        assert_eq!(lib, LibraryError::General("stream is closed".into()));
        assert!(!lib.is_retryable());
    }
}
