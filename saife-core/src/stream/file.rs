//! File-backed output streams
//!
//! [`FileOutputStream`] owns an open [`File`] for its whole `Open` lifetime
//! and writes through a [`BufferedOutputStream`]. With
//! [`StreamConfig::sync_on_flush`] set, every flush and the final close also
//! call `sync_data` so the bytes are on disk, not only in the OS cache.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use super::{BufferedOutputStream, OutputStats};
use crate::config::StreamConfig;
use crate::errors::{LibraryError, StreamError, StreamResult};
use crate::traits::OutputStream;

/// Buffered output stream writing to a file
///
/// ## Example
///
/// ```rust,no_run
/// use saife_core::stream::FileOutputStream;
/// use saife_core::traits::OutputStream;
///
/// let mut stream = FileOutputStream::create("upload.bin")?;
/// stream.write_byte(0x41)?;
/// stream.write_byte(0x42)?;
/// stream.flush()?;
/// stream.close()?;
/// # Ok::<(), saife_core::StreamError>(())
/// ```
///
/// Dropping an open stream closes it; failures on that path are logged
/// because `Drop` cannot return them. Call [`close`](OutputStream::close)
/// to observe them.
pub struct FileOutputStream {
    /// Buffered writer over the file
    inner: BufferedOutputStream<File>,
    /// Path the file was opened at
    path: PathBuf,
    /// Sync data to disk on flush/close
    sync_on_flush: bool,
}

impl FileOutputStream {
    /// Open `path` with `config`
    pub fn open(path: impl AsRef<Path>, config: &StreamConfig) -> StreamResult<Self> {
        config.validate().map_err(invalid_config)?;

        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(config.create)
            .append(config.append)
            .truncate(!config.append)
            .open(path)?;

        log_debug!("opened {} for writing (append: {})", path.display(), config.append);

        Ok(Self {
            inner: BufferedOutputStream::with_config(file, config),
            path: path.to_path_buf(),
            sync_on_flush: config.sync_on_flush,
        })
    }

    /// Create or truncate `path` with default settings
    pub fn create(path: impl AsRef<Path>) -> StreamResult<Self> {
        Self::open(path, &StreamConfig::default())
    }

    /// Append to `path`, creating it if needed
    pub fn append(path: impl AsRef<Path>) -> StreamResult<Self> {
        Self::open(path, &StreamConfig::default().append(true))
    }

    /// Path the stream writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get statistics
    pub fn stats(&self) -> &OutputStats {
        self.inner.stats()
    }

    /// Whether the file has rejected a write or flush
    pub fn is_faulted(&self) -> bool {
        self.inner.is_faulted()
    }

    fn sync(&mut self) -> StreamResult<()> {
        if !self.sync_on_flush {
            return Ok(());
        }
        let result = match self.inner.get_ref() {
            Some(file) => file.sync_data(),
            None => return Err(StreamError::Closed),
        };
        result.map_err(|e| self.inner.fault(e))
    }
}

/// Config problems surface as `InvalidInput` I/O errors from the factory
fn invalid_config(err: LibraryError) -> StreamError {
    StreamError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        err,
    ))
}

impl OutputStream for FileOutputStream {
    fn write_all(&mut self, buffer: &[u8]) -> StreamResult<()> {
        self.inner.write_all(buffer)
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.inner.flush()?;
        self.sync()
    }

    fn close(&mut self) -> StreamResult<()> {
        if self.inner.is_closed() {
            return Ok(());
        }

        // A faulted stream skips the flush; close() below just releases it
        let flushed = if self.inner.is_faulted() {
            Ok(())
        } else {
            self.flush()
        };
        let released = self.inner.close();

        log_debug!("closed {}", self.path.display());
        flushed.and(released)
    }

    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl Drop for FileOutputStream {
    fn drop(&mut self) {
        if let Err(_e) = self.close() {
            log_warn!("failed to close {} on drop: {}", self.path.display(), _e);
        }
    }
}
