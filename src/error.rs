//! Error types for riakwire
//!
//! Provides a unified error type for all transport and command operations.
//!
//! The variants split into two families:
//! - I/O-layer failures (`Connection`, `ShortRead`, `Read`, `Write`,
//!   `InvalidFrame`): the client could not communicate with the node.
//! - Exchange failures (`Transport`, `Protocol`, `Decode`): a frame was
//!   exchanged but the node rejected the request or the reply was unusable.

use std::io;
use thiserror::Error;

/// Result type alias using RiakError
pub type Result<T> = std::result::Result<T, RiakError>;

/// Unified error type for riakwire operations
#[derive(Debug, Error)]
pub enum RiakError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Fail to connect to {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Stream Errors
    // -------------------------------------------------------------------------
    #[error("Short read: expected {expected} bytes, received {received}")]
    ShortRead { expected: usize, received: usize },

    #[error("Failed to read from socket: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to write message: {0}")]
    Write(#[source] io::Error),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    // -------------------------------------------------------------------------
    // Exchange Errors
    // -------------------------------------------------------------------------
    /// The response code did not match the code expected for the exchange.
    ///
    /// Carries the node's error message and code when the node answered
    /// with `ERROR_RESP`, a generic "unexpected response code" otherwise.
    #[error("{message} (code {code})")]
    Transport { message: String, code: u32 },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RiakError {
    /// True when the node answered but rejected the request
    pub fn is_transport(&self) -> bool {
        matches!(self, RiakError::Transport { .. })
    }

    /// True for failures below the protocol layer (could not communicate)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            RiakError::Connection { .. }
                | RiakError::ShortRead { .. }
                | RiakError::Read(_)
                | RiakError::Write(_)
                | RiakError::InvalidFrame(_)
        )
    }

    /// True when a blocking read or write hit the configured socket timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            RiakError::Read(e) | RiakError::Write(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
            ),
            RiakError::Connection { source, .. } => source.kind() == io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    /// The numeric code of a `Transport` error
    pub fn code(&self) -> Option<u32> {
        match self {
            RiakError::Transport { code, .. } => Some(*code),
            _ => None,
        }
    }
}
