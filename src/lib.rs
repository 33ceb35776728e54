//! # riakwire
//!
//! A blocking client transport for the Riak Protocol Buffers interface:
//! - Length-prefixed, type-coded framing with short-read/short-write recovery
//! - One request/response exchange at a time per connection
//! - Response-code validation and translation of node error replies
//! - Typed commands (get, put, delete, list, query, ...) over a shared dispatcher
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Commands                             │
//! │        (Get / Put / Delete / ListKeys / Query / ...)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ send(message, REQ, RESP)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Protocol Client                          │
//! │     (encode, validate response code, decode or error)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Registry   │          │  Transport  │
//!   │ (code→type) │          │  (frames)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  TCP Stream │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use riakwire::command::kv::Delete;
//! use riakwire::message::DeleteRequest;
//! use riakwire::{Exchange, ProtoClient};
//!
//! # fn main() -> riakwire::Result<()> {
//! let mut client = ProtoClient::new("127.0.0.1", 8087);
//! client.execute::<Delete>(&DeleteRequest::new("users", "alice"))?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod message;
pub mod command;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RiakError, Result};
pub use config::ClientConfig;
pub use client::{Exchange, ProtoClient, SharedClient};
pub use command::{Command, Operation};
pub use protocol::MessageCode;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of riakwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
