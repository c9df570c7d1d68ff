//! Realtime (WebSocket room) configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tuning for room fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Frames queued per connection before sends start waiting
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,

    /// Upper bound on one per-connection send during a broadcast, in milliseconds
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

impl RealtimeConfig {
    /// Per-connection send timeout as Duration
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.outbound_buffer == 0 || self.outbound_buffer > 4096 {
            return Err(ValidationError::InvalidOutboundBuffer);
        }
        if self.send_timeout_ms == 0 || self.send_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidSendTimeout);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: default_outbound_buffer(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

fn default_outbound_buffer() -> usize {
    64
}

fn default_send_timeout_ms() -> u64 {
    1000
}
