//! Core I/O contracts for the SAIFE client SDK
//!
//! Provides the write-side stream abstraction used by file and network
//! collaborators, the concrete streams the SDK ships, and the error
//! taxonomy shared by every SDK operation.
//!
//! Key properties:
//! - Blocking, single-owner streams (`&mut self` everywhere)
//! - Deterministic release: `close()` is idempotent and runs on drop
//! - One failure currency: every error converts into [`LibraryError`]
//!
//! ```no_run
//! use saife_core::{FileOutputStream, LibraryError, OutputStream};
//!
//! fn save(bytes: &[u8]) -> Result<(), LibraryError> {
//!     let mut stream = FileOutputStream::create("payload.bin")?;
//!     stream.write_all(bytes)?;
//!     stream.close()?;
//!     Ok(())
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, rust_2018_idioms)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod config;
pub mod errors;
pub mod stream;
pub mod traits;

// Public API
pub use config::StreamConfig;
pub use errors::{ErrorKind, LibraryError, LibraryResult, StreamError, StreamResult};
pub use stream::{
    BufferedOutputStream, FileOutputStream, FixedOutputStream, MemoryOutputStream, StreamWriter,
};
pub use traits::{OutputStream, StreamState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
