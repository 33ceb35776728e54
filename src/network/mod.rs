//! Network Module
//!
//! TCP connection handling beneath the protocol client.
//!
//! ## Architecture
//! - `Connector` opens streams lazily
//! - `ConnectionState` tracks the single live connection
//! - `FrameTransport` moves whole frames across it

mod connection;
mod connector;
mod transport;

pub use connection::ConnectionState;
pub use connector::{Connector, TcpConnector};
pub use transport::{FrameTransport, READ_CHUNK_SIZE};
