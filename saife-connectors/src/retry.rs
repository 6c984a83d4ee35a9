//! Retry with exponential backoff
//!
//! Streams and connectors never retry on their own. Callers that want to
//! ride out short outages wrap the whole operation in a [`RetryPolicy`],
//! which re-runs it only while it fails with a retryable error
//! (`LibraryError::ServiceUnavailable`):
//!
//! ```text
//! delay(n) = min(base_delay_ms * 2^(n-1), max_delay_ms)    n = 1, 2, ...
//! ```

use std::time::Duration;

use saife_core::LibraryResult;
use serde::{Deserialize, Serialize};

/// Backoff settings for retryable operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay_ms: u64,
    /// Upper bound for any single delay
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 100,
            max_delay_ms: 5_000,
        }
    }
}

impl RetryPolicy {
    /// Run once, never retry
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set total attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set first retry delay in milliseconds
    pub fn base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    /// Set delay cap in milliseconds
    pub fn max_delay_ms(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(63);
        let factor = 1u64.checked_shl(shift).unwrap_or(u64::MAX);
        let ms = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(ms)
    }

    /// Run `op`, sleeping the current thread between attempts
    pub fn run<T, F>(&self, op: F) -> LibraryResult<T>
    where
        F: FnMut() -> LibraryResult<T>,
    {
        self.run_with_sleep(op, std::thread::sleep)
    }

    /// Run `op`, calling `sleep` between attempts
    pub fn run_with_sleep<T, F, S>(&self, mut op: F, mut sleep: S) -> LibraryResult<T>
    where
        F: FnMut() -> LibraryResult<T>,
        S: FnMut(Duration),
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < attempts => {
                    let delay = self.delay_for(attempt);
                    log::warn!(
                        "attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        attempts,
                        err,
                        delay
                    );
                    sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
