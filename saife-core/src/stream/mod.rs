//! Concrete output streams
//!
//! ## Module Organization
//!
//! - `buffered` - [`BufferedOutputStream`] over any `std::io::Write`
//! - `file` - [`FileOutputStream`], the file-backed default
//! - `memory` - [`MemoryOutputStream`] and the fixed-capacity
//!   [`FixedOutputStream`] for tests and staging
//! - `writer` - [`StreamWriter`], an `std::io::Write` adapter
//!
//! | Destination | Buffering      | Full destination       |
//! |-------------|----------------|------------------------|
//! | File        | `StreamConfig` | OS error (`Io`)        |
//! | Memory      | none           | never                  |
//! | Fixed       | none           | `Io(WriteZero)`, no-op |
//!
//! Every stream here rejects writes and flushes after `close()` with
//! [`StreamError::Closed`], treats `flush()` on an empty stream as a no-op,
//! and accepts repeated `close()` calls.

pub mod buffered;
pub mod file;
pub mod memory;
pub mod writer;

pub use buffered::{BufferedOutputStream, OutputStats};
pub use file::FileOutputStream;
pub use memory::{FixedOutputStream, MemoryOutputStream};
pub use writer::StreamWriter;

// Re-export so stream users need a single import path
pub use crate::errors::{StreamError, StreamResult};
pub use crate::traits::{OutputStream, StreamState};
