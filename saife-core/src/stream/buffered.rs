//! Buffered output over any `std::io::Write`
//!
//! Small writes collect in an in-memory buffer and reach the destination
//! when the buffer would overflow, on `flush()`, and on `close()`. Writes at
//! least as large as the buffer go straight through once earlier bytes have
//! been pushed, so ordering is preserved.
//!
//! ## Fault Handling
//!
//! When the destination rejects a write or flush the stream is *faulted*:
//! - the failing call returns `StreamError::Io` with the destination's error
//! - later writes and flushes fail with `StreamError::Io` as well, since the
//!   destination may already hold a partial copy of the pending bytes
//! - `close()` discards whatever is still pending, releases the destination
//!   and returns `Ok(())`; the failed flush is never attempted again

use std::io::{self, Write};

use crate::config::StreamConfig;
use crate::errors::{StreamError, StreamResult};
use crate::traits::OutputStream;

/// Counters kept by buffered streams
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputStats {
    /// Non-empty write calls accepted
    pub write_calls: usize,
    /// Bytes accepted from callers
    pub bytes_written: usize,
    /// Bytes handed to the destination
    pub bytes_flushed: usize,
    /// Successful flushes of the destination
    pub flushes: usize,
}

/// Buffered [`OutputStream`] over a writer it owns
///
/// ## Example
///
/// ```rust
/// use saife_core::stream::BufferedOutputStream;
/// use saife_core::traits::OutputStream;
///
/// let mut stream = BufferedOutputStream::with_capacity(Vec::new(), 16);
/// stream.write_all(b"hello")?;
/// stream.flush()?;
/// assert_eq!(stream.get_ref().map(Vec::as_slice), Some(&b"hello"[..]));
/// stream.close()?;
/// # Ok::<(), saife_core::StreamError>(())
/// ```
pub struct BufferedOutputStream<W: Write> {
    /// Destination; `None` once closed
    inner: Option<W>,
    /// Pending bytes
    buffer: Vec<u8>,
    /// Flush threshold
    capacity: usize,
    /// Destination rejected a write or flush
    faulted: bool,
    /// Statistics
    stats: OutputStats,
}

impl<W: Write> BufferedOutputStream<W> {
    /// Wrap `inner` with the default buffer size
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, &StreamConfig::default())
    }

    /// Wrap `inner` with the buffer size from `config`
    pub fn with_config(inner: W, config: &StreamConfig) -> Self {
        Self::with_capacity(inner, config.buffer_capacity)
    }

    /// Wrap `inner` with a buffer of `capacity` bytes (at least one)
    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Some(inner),
            buffer: Vec::with_capacity(capacity),
            capacity,
            faulted: false,
            stats: OutputStats::default(),
        }
    }

    /// The destination, unless the stream is closed
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// Bytes accepted but not yet handed to the destination
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Buffer size in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the destination has rejected a write or flush
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Get statistics
    pub fn stats(&self) -> &OutputStats {
        &self.stats
    }

    /// Flush pending bytes and hand back the destination
    pub fn into_inner(mut self) -> StreamResult<W> {
        self.flush()?;
        self.inner.take().ok_or(StreamError::Closed)
    }

    /// Record a destination failure and turn it into a stream error
    pub(crate) fn fault(&mut self, err: io::Error) -> StreamError {
        log_warn!("output destination failed: {}", err);
        self.faulted = true;
        StreamError::Io(err)
    }

    fn check_writable(&self) -> StreamResult<()> {
        if self.inner.is_none() {
            return Err(StreamError::Closed);
        }
        if self.faulted {
            return Err(StreamError::Io(io::Error::new(
                io::ErrorKind::Other,
                "an earlier write to the destination failed",
            )));
        }
        Ok(())
    }

    /// Hand every pending byte to the destination
    fn drain(&mut self) -> StreamResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let result = match self.inner.as_mut() {
            Some(inner) => Write::write_all(inner, &self.buffer),
            None => return Err(StreamError::Closed),
        };
        match result {
            Ok(()) => {
                self.stats.bytes_flushed += self.buffer.len();
                self.buffer.clear();
                Ok(())
            }
            Err(e) => Err(self.fault(e)),
        }
    }

    /// Drain and flush the destination itself
    fn flush_inner(&mut self) -> StreamResult<()> {
        self.drain()?;
        let result = match self.inner.as_mut() {
            Some(inner) => Write::flush(inner),
            None => return Err(StreamError::Closed),
        };
        match result {
            Ok(()) => {
                self.stats.flushes += 1;
                Ok(())
            }
            Err(e) => Err(self.fault(e)),
        }
    }
}

impl<W: Write> OutputStream for BufferedOutputStream<W> {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        self.check_writable()?;
        if buffer.is_empty() {
            return Ok(());
        }

        if self.buffer.len() + buffer.len() > self.capacity {
            self.drain()?;
        }

        if buffer.len() >= self.capacity {
            let result = match self.inner.as_mut() {
                Some(inner) => Write::write_all(inner, buffer),
                None => return Err(StreamError::Closed),
            };
            if let Err(e) = result {
                return Err(self.fault(e));
            }
            self.stats.bytes_flushed += buffer.len();
        } else {
            self.buffer.extend_from_slice(buffer);
        }

        self.stats.write_calls += 1;
        self.stats.bytes_written += buffer.len();
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.check_writable()?;
        self.flush_inner()
    }

    fn close(&mut self) -> StreamResult<()> {
        if self.inner.is_none() {
            return Ok(());
        }

        let result = if self.faulted {
            if !self.buffer.is_empty() {
                log_warn!("discarding {} unflushed bytes from faulted stream", self.buffer.len());
            }
            Ok(())
        } else {
            self.flush_inner()
        };

        self.buffer.clear();
        self.inner = None;
        log_debug!(
            "output stream closed after {} bytes ({} flushed)",
            self.stats.bytes_written,
            self.stats.bytes_flushed
        );
        result
    }

    fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl<W: Write> Drop for BufferedOutputStream<W> {
    fn drop(&mut self) {
        if let Err(_e) = self.close() {
            log_warn!("failed to close output stream on drop: {}", _e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writer that fails after `limit` bytes
    struct LimitedWriter {
        data: Vec<u8>,
        limit: usize,
    }

    impl Write for LimitedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit.saturating_sub(self.data.len());
            if room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            let n = room.min(buf.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn small_writes_stay_buffered() {
        let mut stream = BufferedOutputStream::with_capacity(Vec::new(), 8);
        stream.write_all(b"abc").unwrap();
        stream.write_byte(b'd').unwrap();

        assert_eq!(stream.pending(), b"abcd");
        assert_eq!(stream.get_ref().unwrap().len(), 0);

        stream.flush().unwrap();
        assert!(stream.pending().is_empty());
        assert_eq!(stream.get_ref().unwrap().as_slice(), b"abcd");
        assert_eq!(stream.stats().flushes, 1);
    }

    #[test]
    fn overflow_drains_in_order() {
        let mut stream = BufferedOutputStream::with_capacity(Vec::new(), 4);
        stream.write_all(b"ab").unwrap();
        stream.write_all(b"cde").unwrap(); // forces "ab" out first
        stream.write_all(b"fghijk").unwrap(); // larger than the buffer

        let out = stream.into_inner().unwrap();
        assert_eq!(out, b"abcdefghijk");
    }

    #[test]
    fn stats_track_writes() {
        let mut stream = BufferedOutputStream::with_capacity(Vec::new(), 4);
        stream.write_all(b"").unwrap();
        stream.write_all(b"12").unwrap();
        stream.write_all(b"3456").unwrap();
        stream.close().unwrap();

        let stats = stream.stats();
        assert_eq!(stats.write_calls, 2);
        assert_eq!(stats.bytes_written, 6);
        assert_eq!(stats.bytes_flushed, 6);
    }

    #[test]
    fn closed_stream_rejects_everything() {
        let mut stream = BufferedOutputStream::new(Vec::new());
        stream.close().unwrap();
        stream.close().unwrap();

        assert!(stream.write_byte(1).unwrap_err().is_closed());
        assert!(stream.write_all(b"x").unwrap_err().is_closed());
        assert!(stream.flush().unwrap_err().is_closed());
        assert!(stream.get_ref().is_none());
    }

    #[test]
    fn fault_then_close_releases_without_retry() {
        let sink = LimitedWriter { data: Vec::new(), limit: 3 };
        let mut stream = BufferedOutputStream::with_capacity(sink, 16);
        stream.write_all(b"hello").unwrap();

        let err = stream.flush().unwrap_err();
        assert!(err.is_io());
        assert!(stream.is_faulted());

        // Faulted streams refuse new data with an I/O error, not Closed
        assert!(stream.write_byte(b'!').unwrap_err().is_io());

        assert!(stream.close().is_ok());
        assert!(stream.is_closed());
        assert!(stream.close().is_ok());
    }

    #[test]
    fn close_reports_flush_failure_once() {
        let sink = LimitedWriter { data: Vec::new(), limit: 2 };
        let mut stream = BufferedOutputStream::with_capacity(sink, 16);
        stream.write_all(b"abcd").unwrap();

        assert!(stream.close().unwrap_err().is_io());
        assert!(stream.is_closed());
        assert!(stream.close().is_ok());
    }
}
