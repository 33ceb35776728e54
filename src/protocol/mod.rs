//! Protocol Module
//!
//! Defines the Riak Protocol Buffers wire protocol.
//!
//! ## Frame Format
//! ```text
//! ┌──────────────┬──────────┬─────────────────────────────┐
//! │ Len (4, BE)  │ Code (1) │       Body (Len - 1)        │
//! └──────────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Codes
//! - 0x00: ERROR_RESP - Body: `RpbErrorResp`
//! - 0x09/0x0A: GET    - `RpbGetReq` / `RpbGetResp`
//! - 0x0B/0x0C: PUT    - `RpbPutReq` / `RpbPutResp`
//! - 0x0D/0x0E: DEL    - `RpbDelReq` / empty
//! - ...see [`MessageCode`] for the full table
//!
//! Which structural type decodes a body is decided by [`ResponseRegistry`].

mod codes;
mod frame;
pub mod messages;
mod registry;

pub use codes::MessageCode;
pub use frame::{
    decode_frame, encode_frame, encode_header, parse_length, split_body, Frame,
    LENGTH_PREFIX_SIZE, MAX_FRAME_SIZE,
};
pub use registry::{ResponseDecoder, ResponseMessage, ResponseRegistry, DEFAULT_RESPONSE_TYPES};
