//! Connectors
//!
//! Opens the byte stream a protocol client talks over.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Result, RiakError};

/// Opens fresh streams to a node
pub trait Connector {
    /// Stream produced by a successful connect
    type Stream: Read + Write;

    /// Open a new stream. Called lazily, and again after every invalidation.
    fn connect(&mut self) -> Result<Self::Stream>;

    /// Blocking I/O timeout applied to streams opened from now on
    fn set_timeout(&mut self, timeout: Option<Duration>);

    fn timeout(&self) -> Option<Duration>;

    /// Human readable peer for logs
    fn describe(&self) -> String;
}

/// Plain TCP connector
#[derive(Debug, Clone)]
pub struct TcpConnector {
    host: String,
    port: u16,
    timeout: Option<Duration>,
    nodelay: bool,
}

impl TcpConnector {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: None,
            nodelay: true,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            timeout: config.timeout,
            nodelay: config.nodelay,
        }
    }

    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn open(&self) -> std::io::Result<TcpStream> {
        let Some(timeout) = self.timeout else {
            return TcpStream::connect((self.host.as_str(), self.port));
        };

        // connect_timeout takes a single address, so try each resolved one
        let mut last_err = None;
        for addr in (self.host.as_str(), self.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "host did not resolve to any address",
            )
        }))
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(&mut self) -> Result<TcpStream> {
        let address = self.address();
        let connection_error = |source| RiakError::Connection {
            address: address.clone(),
            source,
        };

        let stream = self.open().map_err(connection_error)?;

        if self.timeout.is_some() {
            stream.set_read_timeout(self.timeout).map_err(connection_error)?;
            stream.set_write_timeout(self.timeout).map_err(connection_error)?;
        }
        if self.nodelay {
            stream.set_nodelay(true).map_err(connection_error)?;
        }

        tracing::debug!("Connected to {}", address);
        Ok(stream)
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn describe(&self) -> String {
        self.address()
    }
}
