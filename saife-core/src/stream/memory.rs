//! Memory-backed output streams for testing and replay
//!
//! This module provides in-memory destinations that are useful for:
//! - Unit testing code written against [`OutputStream`]
//! - Capturing output before handing it to another collaborator
//! - Bounded staging areas that must never allocate ([`FixedOutputStream`])

use std::io;

use crate::errors::{StreamError, StreamResult};
use crate::traits::OutputStream;

/// Growable in-memory destination
///
/// Written bytes stay readable after `close()`.
///
/// ## Example
///
/// ```rust
/// use saife_core::stream::MemoryOutputStream;
/// use saife_core::traits::OutputStream;
///
/// let mut stream = MemoryOutputStream::new();
/// stream.write_byte(0x41)?;
/// stream.write_byte(0x42)?;
/// stream.flush()?;
/// stream.close()?;
/// assert_eq!(stream.contents(), &[0x41, 0x42]);
/// # Ok::<(), saife_core::StreamError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryOutputStream {
    data: Vec<u8>,
    closed: bool,
}

impl MemoryOutputStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            closed: false,
        }
    }

    /// Bytes written so far
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take the written bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl OutputStream for MemoryOutputStream {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        self.data.extend_from_slice(buffer);
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Fixed-capacity destination backed by `heapless::Vec`
///
/// A write that does not fit fails with an `io::ErrorKind::WriteZero` I/O
/// error and leaves the contents untouched, the same way a full disk
/// refuses data.
#[derive(Debug, Default)]
pub struct FixedOutputStream<const N: usize> {
    data: heapless::Vec<u8, N>,
    closed: bool,
}

impl<const N: usize> FixedOutputStream<N> {
    /// Create an empty stream
    pub fn new() -> Self {
        Self {
            data: heapless::Vec::new(),
            closed: false,
        }
    }

    /// Bytes written so far
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    /// Bytes that can still be written
    pub fn remaining(&self) -> usize {
        N - self.data.len()
    }

    fn full(&self, requested: usize) -> StreamError {
        StreamError::Io(io::Error::new(
            io::ErrorKind::WriteZero,
            format!(
                "fixed stream capacity of {} bytes exhausted ({} requested, {} free)",
                N,
                requested,
                self.remaining()
            ),
        ))
    }
}

impl<const N: usize> OutputStream for FixedOutputStream<N> {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        if buffer.len() > self.remaining() {
            return Err(self.full(buffer.len()));
        }
        self.data
            .extend_from_slice(buffer)
            .map_err(|_| self.full(buffer.len()))
    }

    fn flush(&mut self) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        Ok(())
    }

    fn close(&mut self) -> StreamResult<()> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
