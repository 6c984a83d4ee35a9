//! Client configuration
//!
//! Groups the knobs a client sets once at startup: retry behaviour, the
//! unlock attempt limit, and the options for local streams. Loaded from
//! JSON; missing fields take their defaults.

use saife_core::{LibraryError, LibraryResult, StreamConfig};
use serde::{Deserialize, Serialize};

use crate::RetryPolicy;

/// Default number of wrong passwords before the library is admin locked
pub const DEFAULT_MAX_UNLOCK_ATTEMPTS: u32 = 3;

/// Client-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backoff for operations that hit a service outage
    pub retry: RetryPolicy,
    /// Consecutive wrong passwords tolerated by the unlock flow
    pub max_unlock_attempts: u32,
    /// Options for local file streams
    pub stream: StreamConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            max_unlock_attempts: DEFAULT_MAX_UNLOCK_ATTEMPTS,
            stream: StreamConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> LibraryResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LibraryError::new(format!("invalid client configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no client can run with
    pub fn validate(&self) -> LibraryResult<()> {
        if self.retry.max_attempts == 0 {
            return Err(LibraryError::new("retry.max_attempts must be at least 1"));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(LibraryError::new(
                "retry.base_delay_ms must not exceed retry.max_delay_ms",
            ));
        }
        if self.max_unlock_attempts == 0 {
            return Err(LibraryError::new("max_unlock_attempts must be at least 1"));
        }
        self.stream.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        ClientConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(
            r#"{"retry": {"max_attempts": 6}, "stream": {"buffer_capacity": 512}}"#,
        )
        .unwrap();

        assert_eq!(config.retry.max_attempts, 6);
        assert_eq!(config.retry.base_delay_ms, RetryPolicy::default().base_delay_ms);
        assert_eq!(config.stream.buffer_capacity, 512);
        assert_eq!(config.max_unlock_attempts, DEFAULT_MAX_UNLOCK_ATTEMPTS);
    }

    #[test]
    fn rejects_invalid_settings() {
        let err = ClientConfig::from_json(r#"{"max_unlock_attempts": 0}"#).unwrap_err();
        assert_eq!(err.error(), "max_unlock_attempts must be at least 1");

        let err = ClientConfig::from_json(r#"{"stream": {"buffer_capacity": 0}}"#).unwrap_err();
        assert_eq!(err.error(), "buffer_capacity must be greater than zero");

        let err = ClientConfig::from_json("not json").unwrap_err();
        assert!(err.error().starts_with("invalid client configuration"));
    }
}
