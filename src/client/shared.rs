//! Shared client
//!
//! Serializes whole exchanges from several threads onto one client.

use std::sync::Arc;

use parking_lot::Mutex;
use prost::Message;

use super::{Exchange, ProtoClient};
use crate::command::Operation;
use crate::error::Result;
use crate::network::{Connector, TcpConnector};
use crate::protocol::{MessageCode, ResponseMessage};

/// A protocol client behind a mutex
///
/// Each `send`, `emit` and `receive_message` holds the lock for exactly
/// one exchange. Operations spanning several frames (such as key
/// listing) are run through [`SharedClient::execute`], which holds the
/// lock for the whole operation.
pub struct SharedClient<C: Connector = TcpConnector> {
    inner: Arc<Mutex<ProtoClient<C>>>,
}

impl<C: Connector> SharedClient<C> {
    pub fn new(client: ProtoClient<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run `f` with exclusive access to the client
    pub fn with_client<R>(&self, f: impl FnOnce(&mut ProtoClient<C>) -> R) -> R {
        let mut client = self.inner.lock();
        f(&mut client)
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().is_connected()
    }

    pub fn close(&self) {
        self.inner.lock().close();
    }
}

impl<C: Connector> Clone for SharedClient<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Connector> Exchange for SharedClient<C> {
    fn send<M: Message>(
        &mut self,
        message: &M,
        request_code: MessageCode,
        expected_code: MessageCode,
    ) -> Result<Option<ResponseMessage>> {
        self.inner.lock().send(message, request_code, expected_code)
    }

    fn emit<M: Message>(&mut self, message: &M, request_code: MessageCode) -> Result<()> {
        self.inner.lock().emit(message, request_code)
    }

    fn receive_message(&mut self, expected_code: MessageCode) -> Result<ResponseMessage> {
        self.inner.lock().receive_message(expected_code)
    }

    fn execute<O: Operation>(&mut self, request: &O::Request) -> Result<O::Response> {
        self.with_client(|client| O::execute(client, request))
    }
}
