//! Shared test doubles for integration tests
//!
//! Provides:
//! - `FlakyWriter`, a destination that starts refusing data after a byte budget
//! - `read_back`, the independent reader used to check written files

#![allow(dead_code)]

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Destination that accepts `budget` bytes, then fails every write
///
/// The accepted bytes are shared so a test can inspect them after the
/// stream owning the writer has been closed and dropped.
#[derive(Clone)]
pub struct FlakyWriter {
    pub accepted: Arc<Mutex<Vec<u8>>>,
    budget: usize,
    kind: io::ErrorKind,
    pub flush_calls: Arc<Mutex<usize>>,
}

impl FlakyWriter {
    pub fn new(budget: usize) -> Self {
        Self::with_kind(budget, io::ErrorKind::Other)
    }

    pub fn with_kind(budget: usize, kind: io::ErrorKind) -> Self {
        Self {
            accepted: Arc::new(Mutex::new(Vec::new())),
            budget,
            kind,
            flush_calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn accepted(&self) -> Vec<u8> {
        self.accepted.lock().unwrap().clone()
    }

    pub fn flush_calls(&self) -> usize {
        *self.flush_calls.lock().unwrap()
    }
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut accepted = self.accepted.lock().unwrap();
        let room = self.budget.saturating_sub(accepted.len());
        if room == 0 {
            return Err(io::Error::new(self.kind, "destination refused data"));
        }
        let n = room.min(buf.len());
        accepted.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flush_calls.lock().unwrap() += 1;
        Ok(())
    }
}

/// Read a file back with plain std I/O, independent of the stream under test
pub fn read_back(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("file should be readable")
}
