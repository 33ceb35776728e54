//! Frame codec
//!
//! Pure encoding and decoding of complete frames held in memory. The
//! streaming read/write loops live in `network::transport`.
//!
//! ## Wire Format
//! ```text
//! ┌──────────────┬──────────┬─────────────────────────────┐
//! │ Len (4, BE)  │ Code (1) │       Body (Len - 1)        │
//! └──────────────┴──────────┴─────────────────────────────┘
//! ```
//! `Len` counts the code byte plus the body, so it is always >= 1.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, RiakError};

/// Size of the big-endian length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Default ceiling for a declared frame length (64 MB)
pub const MAX_FRAME_SIZE: u32 = 64 * 1024 * 1024;

/// One length-prefixed, type-coded unit of wire data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message-type code
    pub code: u8,

    /// Encoded message body (empty for acknowledgement-only messages)
    pub payload: Bytes,
}

impl Frame {
    pub fn new(code: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            code,
            payload: payload.into(),
        }
    }

    /// Value written into the length prefix
    pub fn wire_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// Serialize the frame, prefix included
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode_frame(self.code, &self.payload)
    }
}

/// Build the 5-byte frame header (length prefix + code)
pub fn encode_header(code: u8, payload_len: usize) -> Result<[u8; LENGTH_PREFIX_SIZE + 1]> {
    let len = u32::try_from(payload_len + 1).map_err(|_| {
        RiakError::InvalidFrame(format!("payload of {} bytes does not fit a frame", payload_len))
    })?;

    let mut header = [0u8; LENGTH_PREFIX_SIZE + 1];
    header[..LENGTH_PREFIX_SIZE].copy_from_slice(&len.to_be_bytes());
    header[LENGTH_PREFIX_SIZE] = code;
    Ok(header)
}

/// Encode a frame to bytes
///
/// Format: len (4) + code (1) + payload
pub fn encode_frame(code: u8, payload: &[u8]) -> Result<Vec<u8>> {
    let header = encode_header(code, payload.len())?;

    let mut buf = BytesMut::with_capacity(header.len() + payload.len());
    buf.put_slice(&header);
    buf.put_slice(payload);
    Ok(buf.to_vec())
}

/// Interpret a length prefix, rejecting empty and oversized frames
pub fn parse_length(prefix: [u8; LENGTH_PREFIX_SIZE], max_frame_size: u32) -> Result<usize> {
    let len = u32::from_be_bytes(prefix);

    if len == 0 {
        return Err(RiakError::InvalidFrame(
            "zero length frame has no message code".to_string(),
        ));
    }
    if len > max_frame_size {
        return Err(RiakError::InvalidFrame(format!(
            "frame too large: {} bytes (max {})",
            len, max_frame_size
        )));
    }

    Ok(len as usize)
}

/// Split an accumulated frame body into its code and payload
pub fn split_body(mut body: BytesMut) -> Result<Frame> {
    if body.is_empty() {
        return Err(RiakError::InvalidFrame("frame body is empty".to_string()));
    }
    let code = body[0];
    let payload = body.split_off(1).freeze();
    Ok(Frame { code, payload })
}

/// Decode one complete frame from the front of `bytes`
///
/// Returns the frame and the number of bytes consumed.
pub fn decode_frame(bytes: &[u8]) -> Result<(Frame, usize)> {
    if bytes.len() < LENGTH_PREFIX_SIZE {
        return Err(RiakError::ShortRead {
            expected: LENGTH_PREFIX_SIZE,
            received: bytes.len(),
        });
    }

    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    prefix.copy_from_slice(&bytes[..LENGTH_PREFIX_SIZE]);
    let len = parse_length(prefix, u32::MAX)?;

    let available = bytes.len() - LENGTH_PREFIX_SIZE;
    if available < len {
        return Err(RiakError::ShortRead {
            expected: len,
            received: available,
        });
    }

    let body = BytesMut::from(&bytes[LENGTH_PREFIX_SIZE..LENGTH_PREFIX_SIZE + len]);
    Ok((split_body(body)?, LENGTH_PREFIX_SIZE + len))
}
