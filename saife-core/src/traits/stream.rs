//! Output Stream Traits
//!
//! This module defines the write-side stream contract used across the SDK.
//! Streams are blocking and single-owner: every operation takes `&mut self`,
//! so sharing one stream between threads needs external synchronisation.
//!
//! ## Lifecycle
//!
//! ```text
//! factory ──► Open ──close()──► Closed
//!              │ ▲                 │
//!              └─┘ write/flush     └─ write/flush → StreamError::Closed
//! ```
//!
//! `close()` is the only transition and it is terminal. Calling it again is
//! always `Ok(())`.
//!
//! ## Common Patterns
//!
//! ```rust
//! use saife_core::traits::OutputStream;
//! use saife_core::StreamResult;
//!
//! fn write_record<S: OutputStream + ?Sized>(stream: &mut S, record: &[u8]) -> StreamResult<()> {
//!     stream.write_byte(record.len() as u8)?;
//!     stream.write_all(record)?;
//!     stream.flush()
//! }
//! ```

use crate::errors::{StreamError, StreamResult};

/// Lifecycle state of an output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Accepting writes
    Open,
    /// Released; every further write or flush fails
    Closed,
}

/// Write-only byte channel to a file-like destination
///
/// Implementors provide one canonical write ([`write_all`](Self::write_all))
/// plus `flush`, `close` and `is_closed`. The single-byte, sub-range and raw
/// pointer forms are built on top of it.
///
/// ## Contract
///
/// - Writes keep caller order; nothing is reordered or truncated
/// - On an open stream, an error from `write_all` either happened before any
///   byte was queued or comes from the destination itself (`StreamError::Io`)
/// - Writes and flushes on a closed stream fail with `StreamError::Closed`
/// - `flush` with nothing pending is a successful no-op
/// - `close` releases the destination even if it reports an error, and a
///   second `close` returns `Ok(())` without touching the destination again
pub trait OutputStream {
    /// Writes every byte of `buffer`, in order
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()>;

    /// Forces buffered bytes to the destination
    fn flush(&mut self) -> StreamResult<()>;

    /// Releases the destination; idempotent
    fn close(&mut self) -> StreamResult<()>;

    /// Whether `close` has been called
    fn is_closed(&self) -> bool;

    /// Current lifecycle state
    fn state(&self) -> StreamState {
        if self.is_closed() {
            StreamState::Closed
        } else {
            StreamState::Open
        }
    }

    /// Writes a single byte
    fn write_byte(&mut self, b: u8) -> StreamResult<()> {
        self.write_all(&[b])
    }

    /// Writes `length` bytes of `buffer` starting at `offset`
    ///
    /// Fails with `StreamError::OutOfRange` before anything is written when
    /// the range does not fit in `buffer`.
    fn write_range(&mut self, buffer: &[u8], offset: usize, length: usize) -> StreamResult<()> {
        let bytes = checked_range(buffer, offset, length)?;
        self.write_all(bytes)
    }

    /// Writes `length` bytes starting at `ptr`
    ///
    /// No bounds checking is performed.
    ///
    /// # Safety
    ///
    /// When `length > 0`, `ptr` must be valid for reads of `length` bytes and
    /// the memory must not be mutated for the duration of the call. `ptr` is
    /// never read when `length == 0`.
    unsafe fn write_raw(&mut self, ptr: *const u8, length: usize) -> StreamResult<()> {
        if length == 0 {
            return self.write_all(&[]);
        }
        // SAFETY: the caller guarantees `length` readable bytes at `ptr`.
        let bytes = unsafe { core::slice::from_raw_parts(ptr, length) };
        self.write_all(bytes)
    }
}

/// Returns `buffer[offset..offset + length]` or `OutOfRange` if it doesn't fit
pub fn checked_range(buffer: &[u8], offset: usize, length: usize) -> StreamResult<&[u8]> {
    offset
        .checked_add(length)
        .filter(|&end| end <= buffer.len())
        .map(|end| &buffer[offset..end])
        .ok_or(StreamError::OutOfRange {
            offset,
            length,
            size: buffer.len(),
        })
}

impl<S: OutputStream + ?Sized> OutputStream for &mut S {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        (**self).write_all(buffer)
    }

    fn flush(&mut self) -> StreamResult<()> {
        (**self).flush()
    }

    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<S: OutputStream + ?Sized> OutputStream for Box<S> {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        (**self).write_all(buffer)
    }

    fn flush(&mut self) -> StreamResult<()> {
        (**self).flush()
    }

    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}
