//! In-memory connector
//!
//! Stands in for the SAIFE network share in tests and demos. Objects live
//! in a map; the connection can be switched off, or made to drop a fixed
//! number of sends, to exercise outage handling.

use std::collections::HashMap;

use crate::{ConnectionStats, Connector, ConnectorError};

/// Object store held in memory
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    objects: HashMap<String, Vec<u8>>,
    online: bool,
    /// Sends to reject with `NotConnected` before recovering
    failures_pending: u32,
    /// Largest object accepted, if limited
    max_object_size: Option<usize>,
    stats: ConnectionStats,
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConnector {
    /// Create an empty, connected store
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            online: true,
            failures_pending: 0,
            max_object_size: None,
            stats: ConnectionStats::default(),
        }
    }

    /// Reject objects larger than `bytes` with `BufferFull`
    pub fn with_object_limit(mut self, bytes: usize) -> Self {
        self.max_object_size = Some(bytes);
        self
    }

    /// Take the store on or off line
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    /// Fail the next `count` sends with `NotConnected`
    pub fn fail_next_sends(&mut self, count: u32) {
        self.failures_pending = count;
    }

    /// Stored object, if any
    pub fn object(&self, name: &str) -> Option<&[u8]> {
        self.objects.get(name).map(Vec::as_slice)
    }

    /// Names of all stored objects, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn reject(&mut self, err: ConnectorError) -> ConnectorError {
        self.stats.messages_failed += 1;
        self.stats.last_error = Some(err.to_string());
        err
    }
}

impl Connector for MemoryConnector {
    type Error = ConnectorError;

    fn send(&mut self, name: &str, data: &[u8]) -> Result<(), Self::Error> {
        if !self.online {
            return Err(self.reject(ConnectorError::NotConnected));
        }
        if self.failures_pending > 0 {
            self.failures_pending -= 1;
            return Err(self.reject(ConnectorError::NotConnected));
        }
        if name.is_empty() {
            return Err(self.reject(ConnectorError::ProtocolError("empty object name".into())));
        }
        if let Some(limit) = self.max_object_size {
            if data.len() > limit {
                return Err(self.reject(ConnectorError::BufferFull));
            }
        }

        self.objects.insert(name.to_string(), data.to_vec());
        self.stats.messages_sent += 1;
        self.stats.bytes_sent += data.len() as u64;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.online
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}
