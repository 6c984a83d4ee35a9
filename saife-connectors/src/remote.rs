//! Remote output streams
//!
//! A [`RemoteOutputStream`] stages bytes locally and publishes the whole
//! object through a [`Connector`] on `flush()` and `close()`. Publishing
//! replaces the object, so a flush that failed because the service was
//! unreachable can simply be called again once it is back.
//!
//! A failed publish is remembered until a later `flush()` succeeds:
//! - `write_all` refuses new bytes with `StreamError::Io`, so nothing is
//!   accepted that could be lost silently
//! - `close()` releases the stream without publishing and discards the
//!   staged bytes, whose loss the failed publish already reported

use std::io;

use saife_core::{OutputStream, StreamError, StreamResult};

use crate::Connector;

/// Output stream whose destination is a named object behind a connector
///
/// ## Example
///
/// ```rust
/// use saife_connectors::{MemoryConnector, RemoteOutputStream};
/// use saife_core::OutputStream;
///
/// let mut share = MemoryConnector::new();
/// let mut stream = RemoteOutputStream::new(&mut share, "notes.txt");
/// stream.write_all(b"hello")?;
/// stream.close()?;
/// drop(stream);
///
/// assert_eq!(share.object("notes.txt"), Some(&b"hello"[..]));
/// # Ok::<(), saife_core::StreamError>(())
/// ```
pub struct RemoteOutputStream<C: Connector> {
    connector: C,
    name: String,
    staged: Vec<u8>,
    /// Staged bytes not yet published
    dirty: bool,
    /// Last publish attempt failed
    failed: bool,
    closed: bool,
}

impl<C: Connector> RemoteOutputStream<C> {
    /// Stream into object `name`
    pub fn new(connector: C, name: impl Into<String>) -> Self {
        Self {
            connector,
            name: name.into(),
            staged: Vec::new(),
            // An empty object is still created on close
            dirty: true,
            failed: false,
            closed: false,
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes written so far
    pub fn staged(&self) -> &[u8] {
        &self.staged
    }

    /// Borrow the connector
    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn publish(&mut self) -> StreamResult<()> {
        match self.connector.send(&self.name, &self.staged) {
            Ok(()) => {
                log::debug!("published {} ({} bytes)", self.name, self.staged.len());
                self.dirty = false;
                self.failed = false;
                Ok(())
            }
            Err(e) => {
                let err: io::Error = e.into();
                log::warn!("publishing {} failed: {}", self.name, err);
                self.failed = true;
                Err(StreamError::Io(err))
            }
        }
    }
}

impl<C: Connector> OutputStream for RemoteOutputStream<C> {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        if self.failed {
            return Err(StreamError::Io(io::Error::new(
                io::ErrorKind::Other,
                "an earlier publish failed; flush again before writing",
            )));
        }
        if !buffer.is_empty() {
            self.staged.extend_from_slice(buffer);
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        if !self.dirty {
            return Ok(());
        }
        self.publish()
    }

    fn close(&mut self) -> StreamResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.failed {
            log::warn!(
                "discarding {} staged bytes for {} after failed publish",
                self.staged.len(),
                self.name
            );
            self.staged.clear();
            return Ok(());
        }

        let result = if self.dirty { self.publish() } else { Ok(()) };
        self.staged.clear();
        result
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<C: Connector> Drop for RemoteOutputStream<C> {
    fn drop(&mut self) {
        if let Err(_e) = self.close() {
            log::warn!("failed to publish {} on drop: {}", self.name, _e);
        }
    }
}
