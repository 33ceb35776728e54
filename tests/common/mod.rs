//! Shared test doubles
//!
//! - `MemoryConnector`: in-memory streams with scripted node replies and
//!   a connect counter
//! - `MockNode`: a loopback TCP node driven by a per-connection handler
//! - `RecordingExchange`: records what commands hand to the client

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use prost::Message;
use riakwire::network::Connector;
use riakwire::protocol::{decode_frame, encode_frame, Frame, MessageCode};
use riakwire::{Result, RiakError};

// =============================================================================
// In-memory connector
// =============================================================================

/// Both directions of an in-memory connection, shared with the test
#[derive(Clone, Default)]
pub struct Wire {
    inbound: Arc<Mutex<VecDeque<u8>>>,
    outbound: Arc<Mutex<Vec<u8>>>,
    connects: Arc<AtomicUsize>,
}

impl Wire {
    /// Queue a reply frame for the client to read
    pub fn push_frame(&self, code: u8, payload: &[u8]) {
        self.inbound.lock().extend(encode_frame(code, payload).unwrap());
    }

    pub fn push_message<M: Message>(&self, code: MessageCode, message: &M) {
        self.push_frame(code.as_u8(), &message.encode_to_vec());
    }

    pub fn push_raw(&self, bytes: &[u8]) {
        self.inbound.lock().extend(bytes.iter().copied());
    }

    /// Every frame the client has written so far
    pub fn sent_frames(&self) -> Vec<Frame> {
        let bytes = self.outbound.lock().clone();
        let mut frames = Vec::new();
        let mut offset = 0;
        while offset < bytes.len() {
            let (frame, used) = decode_frame(&bytes[offset..]).unwrap();
            frames.push(frame);
            offset += used;
        }
        frames
    }

    pub fn sent_bytes(&self) -> Vec<u8> {
        self.outbound.lock().clone()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn pending_inbound(&self) -> usize {
        self.inbound.lock().len()
    }
}

/// Stream over a `Wire`; reads return EOF once the queued bytes run out
pub struct MemoryStream {
    wire: Wire,
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut inbound = self.wire.inbound.lock();
        let n = buf.len().min(inbound.len());
        for (slot, byte) in buf.iter_mut().zip(inbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.wire.outbound.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct MemoryConnector {
    wire: Wire,
    timeout: Option<Duration>,
    refuse: bool,
}

impl MemoryConnector {
    pub fn new() -> (Self, Wire) {
        let wire = Wire::default();
        (
            Self {
                wire: wire.clone(),
                timeout: None,
                refuse: false,
            },
            wire,
        )
    }

    /// A connector whose every connect attempt is refused
    pub fn refusing() -> Self {
        Self {
            wire: Wire::default(),
            timeout: None,
            refuse: true,
        }
    }
}

impl Connector for MemoryConnector {
    type Stream = MemoryStream;

    fn connect(&mut self) -> Result<MemoryStream> {
        if self.refuse {
            return Err(RiakError::Connection {
                address: self.describe(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            });
        }
        self.wire.connects.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryStream {
            wire: self.wire.clone(),
        })
    }

    fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// =============================================================================
// Partial I/O stream
// =============================================================================

/// Accepts at most `write_chunk` bytes per write and returns at most
/// `read_chunk` bytes per read
pub struct TrickleStream {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub read_chunk: usize,
    pub write_chunk: usize,
    pub interrupt_next: bool,
}

impl TrickleStream {
    pub fn new(input: Vec<u8>, read_chunk: usize, write_chunk: usize) -> Self {
        Self {
            input: input.into(),
            output: Vec::new(),
            read_chunk,
            write_chunk,
            interrupt_next: false,
        }
    }
}

impl Read for TrickleStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
        }
        let n = buf.len().min(self.read_chunk).min(self.input.len());
        for (slot, byte) in buf.iter_mut().zip(self.input.drain(..n)) {
            *slot = byte;
        }
        self.interrupt_next = true;
        Ok(n)
    }
}

impl Write for TrickleStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.write_chunk);
        self.output.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A stream whose writes are never accepted
pub struct StuckStream;

impl Read for StuckStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl Write for StuckStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Ok(0)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Loopback TCP node
// =============================================================================

pub struct MockNode {
    pub port: u16,
    pub accepted: Arc<AtomicUsize>,
    handle: Option<JoinHandle<()>>,
}

impl MockNode {
    /// Serve `connections` connections, calling `handler(index, stream)`
    /// for each one in accept order
    pub fn spawn<F>(connections: usize, handler: F) -> Self
    where
        F: Fn(usize, &mut TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&accepted);

        let handle = thread::spawn(move || {
            for index in 0..connections {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                counter.fetch_add(1, Ordering::SeqCst);
                handler(index, &mut stream);
            }
        });

        Self {
            port,
            accepted,
            handle: Some(handle),
        }
    }

    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Wait for the node thread to finish its script
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
    }
}

/// Read one request frame on the node side
pub fn read_request(stream: &mut TcpStream) -> Frame {
    let mut prefix = [0u8; 4];
    stream.read_exact(&mut prefix).unwrap();
    let len = u32::from_be_bytes(prefix) as usize;
    let mut body = vec![0u8; len];
    stream.read_exact(&mut body).unwrap();
    Frame::new(body[0], body[1..].to_vec())
}

/// Write one reply frame on the node side
pub fn write_reply(stream: &mut TcpStream, code: MessageCode, payload: &[u8]) {
    stream.write_all(&encode_frame(code.as_u8(), payload).unwrap()).unwrap();
    stream.flush().unwrap();
}

// =============================================================================
// Recording exchange
// =============================================================================

/// One call observed by `RecordingExchange`
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send {
        body: Vec<u8>,
        request_code: MessageCode,
        expected_code: MessageCode,
    },
    Emit {
        body: Vec<u8>,
        request_code: MessageCode,
    },
    Receive {
        expected_code: MessageCode,
    },
}

/// Exchange double that records calls and replays scripted replies
#[derive(Default)]
pub struct RecordingExchange {
    pub calls: Vec<Call>,
    pub send_replies: VecDeque<Result<Option<riakwire::protocol::ResponseMessage>>>,
    pub receive_replies: VecDeque<Result<riakwire::protocol::ResponseMessage>>,
}

impl RecordingExchange {
    pub fn replying(reply: Option<riakwire::protocol::ResponseMessage>) -> Self {
        let mut exchange = Self::default();
        exchange.send_replies.push_back(Ok(reply));
        exchange
    }

    /// Body of the only `send` call, decoded as `M`
    pub fn sent<M: Message + Default>(&self) -> M {
        match self.calls.as_slice() {
            [Call::Send { body, .. }] => M::decode(&body[..]).unwrap(),
            other => panic!("expected exactly one send, got {:?}", other),
        }
    }
}

impl riakwire::Exchange for RecordingExchange {
    fn send<M: Message>(
        &mut self,
        message: &M,
        request_code: MessageCode,
        expected_code: MessageCode,
    ) -> Result<Option<riakwire::protocol::ResponseMessage>> {
        self.calls.push(Call::Send {
            body: message.encode_to_vec(),
            request_code,
            expected_code,
        });
        self.send_replies.pop_front().unwrap_or(Ok(None))
    }

    fn emit<M: Message>(&mut self, message: &M, request_code: MessageCode) -> Result<()> {
        self.calls.push(Call::Emit {
            body: message.encode_to_vec(),
            request_code,
        });
        Ok(())
    }

    fn receive_message(
        &mut self,
        expected_code: MessageCode,
    ) -> Result<riakwire::protocol::ResponseMessage> {
        self.calls.push(Call::Receive { expected_code });
        self.receive_replies
            .pop_front()
            .unwrap_or_else(|| Err(RiakError::Protocol("no scripted reply".to_string())))
    }
}
