//! Protocol Client
//!
//! Runs one complete exchange at a time over a lazily opened connection:
//! encode, frame, send, receive, validate the response code, then decode
//! or translate the error.
//!
//! ## Exchange patterns
//! - `send`: request then typed (or empty) response
//! - `emit`: request only, nothing is read
//! - `receive_message`: read one frame already pushed by the node
//!
//! ## Failure policy
//! Every error raised inside an exchange drops the connection before it
//! is returned. The next exchange connects again. There is no retry.
//!
//! A client is not safe for concurrent exchanges: frames from two callers
//! would interleave on the socket. Use one client per concurrent caller or
//! wrap it in a [`SharedClient`].

mod shared;

pub use shared::SharedClient;

use std::time::Duration;

use prost::Message;

use crate::command::Operation;
use crate::config::ClientConfig;
use crate::error::{Result, RiakError};
use crate::network::{ConnectionState, Connector, FrameTransport, TcpConnector};
use crate::protocol::messages::RpbErrorResp;
use crate::protocol::{Frame, MessageCode, ResponseMessage, ResponseRegistry, MAX_FRAME_SIZE};

/// The exchange contract consumed by commands and other collaborators
pub trait Exchange {
    /// Send `message` and read the reply, which must carry `expected_code`.
    ///
    /// Returns `None` when no body type is registered for `expected_code`.
    fn send<M: Message>(
        &mut self,
        message: &M,
        request_code: MessageCode,
        expected_code: MessageCode,
    ) -> Result<Option<ResponseMessage>>;

    /// Send `message` without reading a reply
    fn emit<M: Message>(&mut self, message: &M, request_code: MessageCode) -> Result<()>;

    /// Read one frame without sending first
    fn receive_message(&mut self, expected_code: MessageCode) -> Result<ResponseMessage>;

    /// Run a store operation through this exchange
    fn execute<O: Operation>(&mut self, request: &O::Request) -> Result<O::Response>
    where
        Self: Sized,
    {
        O::execute(self, request)
    }
}

/// Riak PBC client owning a single connection
pub struct ProtoClient<C: Connector = TcpConnector> {
    /// Opens new streams on demand
    connector: C,

    /// Current connection (lazily established)
    connection: ConnectionState<C::Stream>,

    /// Response code → body type table
    registry: ResponseRegistry,

    /// Largest frame accepted from the node
    max_frame_size: u32,
}

impl ProtoClient<TcpConnector> {
    /// Client for `host:port` with default settings
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_connector(TcpConnector::new(host, port))
    }

    /// Client built from a validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut client = Self::with_connector(TcpConnector::from_config(config));
        client.max_frame_size = config.max_frame_size;
        Ok(client)
    }
}

impl<C: Connector> ProtoClient<C> {
    /// Client over an arbitrary connector
    pub fn with_connector(connector: C) -> Self {
        Self {
            connector,
            connection: ConnectionState::Disconnected,
            registry: ResponseRegistry::default(),
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    /// Replace the response registry
    pub fn with_registry(mut self, registry: ResponseRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &ResponseRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ResponseRegistry {
        &mut self.registry
    }

    /// Blocking I/O timeout. Applies to connections opened afterwards.
    ///
    /// A zero duration is rejected; `None` blocks indefinitely.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        if timeout == Some(Duration::ZERO) {
            return Err(RiakError::Config(
                "timeout must be non-zero; use None to block".to_string(),
            ));
        }
        self.connector.set_timeout(timeout);
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.connector.timeout()
    }

    pub fn set_max_frame_size(&mut self, max_frame_size: u32) {
        self.max_frame_size = max_frame_size;
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Drop the current connection, if any
    pub fn close(&mut self) {
        if self.connection.invalidate() {
            tracing::debug!("Closed connection to {}", self.connector.describe());
        }
    }

    // =========================================================================
    // Exchanges
    // =========================================================================

    /// Send a message and receive the response
    pub fn send<M: Message>(
        &mut self,
        message: &M,
        request_code: MessageCode,
        expected_code: MessageCode,
    ) -> Result<Option<ResponseMessage>> {
        let result = self.try_send(message, request_code, expected_code);
        self.settle(result)
    }

    /// Send a message but do not receive the response
    pub fn emit<M: Message>(&mut self, message: &M, request_code: MessageCode) -> Result<()> {
        let result = self.try_emit(message, request_code);
        self.settle(result)
    }

    /// Receive a message the node pushed without a preceding request
    pub fn receive_message(&mut self, expected_code: MessageCode) -> Result<ResponseMessage> {
        let result = self.try_receive(expected_code);
        self.settle(result)
    }

    fn try_send<M: Message>(
        &mut self,
        message: &M,
        request_code: MessageCode,
        expected_code: MessageCode,
    ) -> Result<Option<ResponseMessage>> {
        tracing::trace!(request = %request_code, expected = %expected_code, "Sending request");

        let payload = message.encode_to_vec();
        let transport = self.transport()?;
        transport.write_frame(request_code.as_u8(), &payload)?;
        let frame = transport.read_frame()?;

        self.check_code(&frame, expected_code)?;
        self.registry.decode(expected_code.as_u8(), &frame.payload)
    }

    fn try_emit<M: Message>(&mut self, message: &M, request_code: MessageCode) -> Result<()> {
        tracing::trace!(request = %request_code, "Emitting request");

        let payload = message.encode_to_vec();
        self.transport()?.write_frame(request_code.as_u8(), &payload)
    }

    fn try_receive(&mut self, expected_code: MessageCode) -> Result<ResponseMessage> {
        let frame = self.transport()?.read_frame()?;
        self.check_code(&frame, expected_code)?;

        self.registry
            .decode(expected_code.as_u8(), &frame.payload)?
            .ok_or_else(|| {
                RiakError::Protocol(format!(
                    "no decodable type registered for response code {}",
                    expected_code
                ))
            })
    }

    fn transport(&mut self) -> Result<&mut FrameTransport<C::Stream>> {
        self.connection
            .ensure_connected(&mut self.connector, self.max_frame_size)
    }

    /// Drop the connection when an exchange failed
    fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if self.connection.invalidate() {
                tracing::debug!(
                    "Discarded connection to {} after error: {}",
                    self.connector.describe(),
                    e
                );
            }
        }
        result
    }

    // =========================================================================
    // Response validation
    // =========================================================================

    fn check_code(&self, frame: &Frame, expected_code: MessageCode) -> Result<()> {
        if frame.code == expected_code.as_u8() {
            return Ok(());
        }
        Err(translate_error(frame.code, &frame.payload))
    }
}

/// Build the error for a response whose code did not match the exchange.
///
/// An `ERROR_RESP` body overrides the default message and code, each only
/// when present.
pub fn translate_error(actual_code: u8, body: &[u8]) -> RiakError {
    let mut code = u32::from(actual_code);
    let mut message = format!("unexpected response code: {}", actual_code);

    if actual_code == MessageCode::ErrorResp.as_u8() {
        match RpbErrorResp::decode(body) {
            Ok(error) => {
                if let Some(errmsg) = error.errmsg {
                    message = String::from_utf8_lossy(&errmsg).into_owned();
                }
                if let Some(errcode) = error.errcode {
                    code = errcode;
                }
            }
            Err(e) => tracing::warn!("Undecodable error response body: {}", e),
        }
        tracing::warn!("Riak error response: {} (code {})", message, code);
    }

    RiakError::Transport { message, code }
}

impl<C: Connector> Exchange for ProtoClient<C> {
    fn send<M: Message>(
        &mut self,
        message: &M,
        request_code: MessageCode,
        expected_code: MessageCode,
    ) -> Result<Option<ResponseMessage>> {
        ProtoClient::send(self, message, request_code, expected_code)
    }

    fn emit<M: Message>(&mut self, message: &M, request_code: MessageCode) -> Result<()> {
        ProtoClient::emit(self, message, request_code)
    }

    fn receive_message(&mut self, expected_code: MessageCode) -> Result<ResponseMessage> {
        ProtoClient::receive_message(self, expected_code)
    }
}
