//! Stream configuration
//!
//! Options for concrete streams, set with builder methods or loaded from
//! JSON when the `serde` feature is enabled:
//!
//! ```json
//! {"buffer_capacity": 8192, "append": true, "create": true, "sync_on_flush": false}
//! ```
//!
//! Missing fields fall back to [`StreamConfig::default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{LibraryError, LibraryResult};

/// Default write buffer size in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Options for buffered and file-backed output streams
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Bytes held in memory before they are pushed to the destination
    pub buffer_capacity: usize,
    /// Append to an existing file instead of truncating it
    pub append: bool,
    /// Create the file if it does not exist
    pub create: bool,
    /// Call `sync_data` on every flush and on close
    pub sync_on_flush: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            append: false,
            create: true,
            sync_on_flush: false,
        }
    }
}

impl StreamConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set write buffer size in bytes
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    /// Append instead of truncating
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Create the file when missing
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Sync file data to disk on flush and close
    pub fn sync_on_flush(mut self, sync: bool) -> Self {
        self.sync_on_flush = sync;
        self
    }

    /// Check the configuration before a stream is opened with it
    pub fn validate(&self) -> LibraryResult<()> {
        if self.buffer_capacity == 0 {
            return Err(LibraryError::new("buffer_capacity must be greater than zero"));
        }
        Ok(())
    }
}
