//! Configuration for riakwire
//!
//! Centralized client configuration with sensible defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiakError};
use crate::protocol::MAX_FRAME_SIZE;

/// Connection settings for a single protocol client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Riak node host name or IP address
    pub host: String,

    /// Riak protocol buffers port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Blocking I/O timeout applied on connect, read and write.
    /// `None` blocks indefinitely.
    pub timeout: Option<Duration>,

    /// Disable Nagle's algorithm on new connections
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Largest frame length (code + body) accepted from the node
    pub max_frame_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8087,
            timeout: None,
            nodelay: true,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` as used for connecting and logging
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject settings that can never produce a working connection
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RiakError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RiakError::Config("port must not be zero".to_string()));
        }
        if self.max_frame_size == 0 {
            return Err(RiakError::Config(
                "max_frame_size must be at least 1".to_string(),
            ));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(RiakError::Config(
                "timeout must be non-zero; use None to block".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ConfigBuilder {
    config: ClientConfig,
}

impl ConfigBuilder {
    /// Set the node host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the node port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the I/O timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the I/O timeout in whole seconds
    pub fn timeout_secs(self, secs: u64) -> Self {
        self.timeout(Duration::from_secs(secs))
    }

    /// Toggle TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the largest accepted frame length
    pub fn max_frame_size(mut self, size: u32) -> Self {
        self.config.max_frame_size = size;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
