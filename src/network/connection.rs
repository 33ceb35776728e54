//! Connection state
//!
//! A client's connection is either absent or live. Any failed exchange
//! drops it (`Connected → Disconnected`); the next exchange opens a fresh
//! one (`Disconnected → Connected`). A failed socket is never reused.

use crate::error::{Result, RiakError};

use super::connector::Connector;
use super::transport::FrameTransport;

/// Two-state connection holder
pub enum ConnectionState<S> {
    Disconnected,
    Connected(FrameTransport<S>),
}

impl<S> Default for ConnectionState<S> {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

impl<S> ConnectionState<S> {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }

    /// Drop the live transport, if any. Returns whether one was dropped.
    pub fn invalidate(&mut self) -> bool {
        matches!(
            std::mem::replace(self, ConnectionState::Disconnected),
            ConnectionState::Connected(_)
        )
    }
}

impl<S: std::io::Read + std::io::Write> ConnectionState<S> {
    /// Return the live transport, connecting first when disconnected
    pub fn ensure_connected<C>(
        &mut self,
        connector: &mut C,
        max_frame_size: u32,
    ) -> Result<&mut FrameTransport<S>>
    where
        C: Connector<Stream = S>,
    {
        if !self.is_connected() {
            let stream = connector.connect()?;
            *self = ConnectionState::Connected(
                FrameTransport::new(stream).with_max_frame_size(max_frame_size),
            );
        }

        match self {
            ConnectionState::Connected(transport) => Ok(transport),
            ConnectionState::Disconnected => Err(RiakError::Protocol(
                "connection unavailable after connect".to_string(),
            )),
        }
    }
}
