//! Real-time WebSocket engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Outbound queue capacity per connection. A full queue drops the message
    /// for that connection only.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Upper bound on a single socket write before the connection is closed.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_seconds: u64,
    /// Inbound frames larger than this are dropped.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl RealtimeConfig {
    /// Socket write timeout as a [`Duration`].
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_seconds)
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            send_timeout_seconds: default_send_timeout(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_send_timeout() -> u64 {
    10
}

fn default_max_frame_bytes() -> usize {
    65_536
}
