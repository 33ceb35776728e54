//! Commands
//!
//! One [`Operation`] per store operation. Each operation fixes its
//! `(request code, response code)` pair and maps a domain request to its
//! wire message and the wire response back to a domain response; the
//! framing, dispatch and error handling are shared through [`Exchange`].
//!
//! ```text
//! domain request ─► create_request_message ─► Exchange::send(msg, REQ, RESP)
//!                                                      │
//! domain response ◄─ create_response ◄─ Option<ResponseMessage>
//! ```

pub mod bucket;
pub mod kv;
pub mod query;
pub mod server;

use std::marker::PhantomData;

use prost::Message;

use crate::client::Exchange;
use crate::error::{Result, RiakError};
use crate::protocol::{MessageCode, ResponseMessage};

/// A single store operation
pub trait Operation {
    /// Domain-level request
    type Request;

    /// Domain-level response
    type Response;

    /// Wire message sent for the request
    type WireRequest: Message;

    const REQUEST_CODE: MessageCode;
    const RESPONSE_CODE: MessageCode;

    /// Map the domain request to its wire message.
    ///
    /// Optional fields absent from the request stay unset.
    fn create_request_message(request: &Self::Request) -> Self::WireRequest;

    /// Map the decoded response (`None` for body-less replies)
    fn create_response(message: Option<ResponseMessage>) -> Result<Self::Response>;

    /// Run the operation as one request/response exchange
    fn execute<E: Exchange>(client: &mut E, request: &Self::Request) -> Result<Self::Response> {
        let message = Self::create_request_message(request);
        let response = client.send(&message, Self::REQUEST_CODE, Self::RESPONSE_CODE)?;
        Self::create_response(response)
    }
}

/// An operation bound to the client it runs on
pub struct Command<'a, E, O> {
    client: &'a mut E,
    operation: PhantomData<O>,
}

impl<'a, E: Exchange, O: Operation> Command<'a, E, O> {
    pub fn new(client: &'a mut E) -> Self {
        Self {
            client,
            operation: PhantomData,
        }
    }

    pub fn request_code(&self) -> MessageCode {
        O::REQUEST_CODE
    }

    pub fn response_code(&self) -> MessageCode {
        O::RESPONSE_CODE
    }

    pub fn create_request_message(&self, request: &O::Request) -> O::WireRequest {
        O::create_request_message(request)
    }

    pub fn send(&mut self, request: &O::Request) -> Result<O::Response> {
        O::execute(&mut *self.client, request)
    }
}

// =============================================================================
// Mapping helpers
// =============================================================================

/// Unwrap a body that the operation's response code always carries
pub(crate) fn typed_body<T>(message: Option<ResponseMessage>, code: MessageCode) -> Result<T>
where
    T: TryFrom<ResponseMessage, Error = RiakError>,
{
    match message {
        Some(message) => T::try_from(message),
        None => Err(RiakError::Protocol(format!(
            "no body decoded for response code {}",
            code
        ))),
    }
}

pub(crate) fn bytes(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

pub(crate) fn opt_bytes(value: &Option<String>) -> Option<Vec<u8>> {
    value.as_deref().map(bytes)
}

pub(crate) fn string(value: Vec<u8>) -> String {
    String::from_utf8(value).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

pub(crate) fn opt_string(value: Option<Vec<u8>>) -> Option<String> {
    value.map(string)
}
