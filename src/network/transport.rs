//! Frame Transport
//!
//! Reliable framing over a blocking byte stream. Neither reads nor writes
//! are assumed to be atomic: both loop until the whole frame has moved.

use std::io::{ErrorKind, Read, Write};

use bytes::BytesMut;

use crate::error::{Result, RiakError};
use crate::protocol::{encode_header, parse_length, split_body, Frame, LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE};

/// Largest single `read` issued while accumulating a frame body
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Owns one stream and moves whole frames across it
pub struct FrameTransport<S> {
    /// Underlying stream (a `TcpStream` outside of tests)
    stream: S,

    /// Largest frame length accepted from the peer
    max_frame_size: u32,
}

impl<S: Read + Write> FrameTransport<S> {
    /// Wrap a connected stream
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            max_frame_size: MAX_FRAME_SIZE,
        }
    }

    /// Override the accepted frame ceiling
    pub fn with_max_frame_size(mut self, max_frame_size: u32) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    /// Write one frame: length prefix `1 + payload.len()`, code, payload
    pub fn write_frame(&mut self, code: u8, payload: &[u8]) -> Result<()> {
        let header = encode_header(code, payload.len())?;

        self.write_fully(&header)?;
        self.write_fully(payload)?;
        self.stream.flush().map_err(RiakError::Write)?;

        tracing::trace!(code, len = payload.len() + 1, "Frame written");
        Ok(())
    }

    /// Read one frame, returning its code and payload
    pub fn read_frame(&mut self) -> Result<Frame> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        let received = self.read_until_full(&mut prefix)?;
        if received < LENGTH_PREFIX_SIZE {
            return Err(RiakError::ShortRead {
                expected: LENGTH_PREFIX_SIZE,
                received,
            });
        }

        let len = parse_length(prefix, self.max_frame_size)?;

        let mut body = BytesMut::with_capacity(len);
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        while body.len() < len {
            let want = (len - body.len()).min(READ_CHUNK_SIZE);
            let n = match self.stream.read(&mut chunk[..want]) {
                Ok(0) => {
                    return Err(RiakError::ShortRead {
                        expected: len,
                        received: body.len(),
                    })
                }
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(RiakError::Read(e)),
            };
            body.extend_from_slice(&chunk[..n]);
        }

        let frame = split_body(body)?;
        tracing::trace!(code = frame.code, len, "Frame read");
        Ok(frame)
    }

    /// Shared access to the stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Give the stream back
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn write_fully(&mut self, mut buf: &[u8]) -> Result<()> {
        while !buf.is_empty() {
            match self.stream.write(buf) {
                Ok(0) => {
                    return Err(RiakError::Write(std::io::Error::new(
                        ErrorKind::WriteZero,
                        format!("stream accepted 0 of {} remaining bytes", buf.len()),
                    )))
                }
                Ok(n) => buf = &buf[n..],
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(RiakError::Write(e)),
            }
        }
        Ok(())
    }

    /// Fill `buf` unless the stream ends first; returns the bytes read.
    fn read_until_full(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(RiakError::Read(e)),
            }
        }
        Ok(filled)
    }
}
