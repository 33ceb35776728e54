//! Frame Transport Tests
//!
//! These tests verify:
//! - Write/read round trip through the streaming loops
//! - Recovery from partial reads and writes
//! - Short-read detection on header and body
//! - Frame size limits

#[path = "../common/mod.rs"]
mod common;

use std::io::Cursor;

use common::{StuckStream, TrickleStream};
use riakwire::network::{FrameTransport, READ_CHUNK_SIZE};
use riakwire::protocol::{encode_frame, MessageCode};
use riakwire::RiakError;

/// Transport reading from a fixed buffer
fn loopback(bytes: Vec<u8>) -> FrameTransport<Cursor<Vec<u8>>> {
    FrameTransport::new(Cursor::new(bytes))
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_write_then_read_round_trip() {
    let payloads: Vec<Vec<u8>> = vec![
        vec![],
        b"x".to_vec(),
        b"test_bucket".to_vec(),
        (0..=255).collect(),
        vec![0x5A; 3 * READ_CHUNK_SIZE + 17],
    ];

    for payload in payloads {
        let mut writer = FrameTransport::new(Cursor::new(Vec::new()));
        writer.write_frame(MessageCode::PutReq.as_u8(), &payload).unwrap();
        let written = writer.into_inner().into_inner();

        assert_eq!(
            u32::from_be_bytes([written[0], written[1], written[2], written[3]]) as usize,
            payload.len() + 1
        );

        let frame = loopback(written).read_frame().unwrap();
        assert_eq!(frame.code, MessageCode::PutReq.as_u8());
        assert_eq!(&frame.payload[..], &payload[..]);
    }
}

#[test]
fn test_reads_consecutive_frames() {
    let mut bytes = encode_frame(MessageCode::ListKeysResp.as_u8(), b"one").unwrap();
    bytes.extend(encode_frame(MessageCode::ListKeysResp.as_u8(), b"two").unwrap());
    let mut transport = loopback(bytes);

    assert_eq!(&transport.read_frame().unwrap().payload[..], b"one");
    assert_eq!(&transport.read_frame().unwrap().payload[..], b"two");
}

// =============================================================================
// Partial I/O Tests
// =============================================================================

#[test]
fn test_partial_writes_are_completed() {
    let payload = b"a payload longer than the write chunk".to_vec();
    let mut transport = FrameTransport::new(TrickleStream::new(Vec::new(), 1, 3));

    transport.write_frame(MessageCode::GetReq.as_u8(), &payload).unwrap();

    let stream = transport.into_inner();
    assert_eq!(stream.output, encode_frame(MessageCode::GetReq.as_u8(), &payload).unwrap());
}

#[test]
fn test_partial_reads_are_accumulated() {
    let payload: Vec<u8> = (0..100).collect();
    let bytes = encode_frame(MessageCode::GetResp.as_u8(), &payload).unwrap();
    let mut transport = FrameTransport::new(TrickleStream::new(bytes, 3, 1));

    let frame = transport.read_frame().unwrap();

    assert_eq!(frame.code, MessageCode::GetResp.as_u8());
    assert_eq!(&frame.payload[..], &payload[..]);
}

#[test]
fn test_zero_byte_write_fails() {
    let mut transport = FrameTransport::new(StuckStream);
    let result = transport.write_frame(MessageCode::PingReq.as_u8(), &[]);
    assert!(matches!(result, Err(RiakError::Write(_))));
}

// =============================================================================
// Short Read Tests
// =============================================================================

#[test]
fn test_empty_stream_is_short_read() {
    let result = loopback(Vec::new()).read_frame();
    assert!(matches!(
        result,
        Err(RiakError::ShortRead { expected: 4, received: 0 })
    ));
}

#[test]
fn test_half_header_is_short_read() {
    let result = loopback(vec![0, 0]).read_frame();
    assert!(matches!(
        result,
        Err(RiakError::ShortRead { expected: 4, received: 2 })
    ));
}

#[test]
fn test_truncated_body_is_short_read() {
    let mut bytes = encode_frame(MessageCode::GetResp.as_u8(), &[7u8; 20]).unwrap();
    bytes.truncate(bytes.len() - 5);

    let result = loopback(bytes).read_frame();
    assert!(matches!(
        result,
        Err(RiakError::ShortRead { expected: 21, received: 16 })
    ));
}

#[test]
fn test_zero_length_frame_rejected() {
    let result = loopback(vec![0, 0, 0, 0]).read_frame();
    assert!(matches!(result, Err(RiakError::InvalidFrame(_))));
}

#[test]
fn test_oversized_frame_rejected_before_reading_body() {
    let bytes = encode_frame(MessageCode::GetResp.as_u8(), &[0u8; 64]).unwrap();
    let mut transport = loopback(bytes).with_max_frame_size(32);

    let result = transport.read_frame();
    assert!(matches!(result, Err(RiakError::InvalidFrame(_))));
    assert_eq!(transport.get_ref().position(), 4);
}
