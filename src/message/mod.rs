//! Domain Messages
//!
//! Plain request/response values exchanged with commands. These carry
//! bucket, key, vector clock and quorum values as opaque data; the
//! commands translate them to and from wire messages.

mod bucket;
mod kv;
mod query;
mod server;

pub use bucket::{ListBucketsRequest, ListBucketsResponse};
pub use kv::{
    Content, DeleteRequest, DeleteResponse, GetRequest, GetResponse, Link, ListKeysRequest,
    ListKeysResponse, PutRequest, PutResponse,
};
pub use query::{
    IndexEntry, IndexQuery, IndexQueryRequest, IndexQueryResponse, SearchDoc, SearchRequest,
    SearchResponse,
};
pub use server::ServerInfo;

use serde::{Deserialize, Serialize};

/// Per-request read/write threshold
///
/// Symbolic values are sent as the reserved `u32` sentinels the node
/// understands; `Count` is sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quorum {
    One,
    Quorum,
    All,
    Default,
    Count(u32),
}

impl Quorum {
    const ONE: u32 = u32::MAX - 1;
    const QUORUM: u32 = u32::MAX - 2;
    const ALL: u32 = u32::MAX - 3;
    const DEFAULT: u32 = u32::MAX - 4;

    /// Value placed on the wire
    pub fn to_wire(self) -> u32 {
        match self {
            Quorum::One => Self::ONE,
            Quorum::Quorum => Self::QUORUM,
            Quorum::All => Self::ALL,
            Quorum::Default => Self::DEFAULT,
            Quorum::Count(n) => n,
        }
    }

    pub fn from_wire(value: u32) -> Self {
        match value {
            Self::ONE => Quorum::One,
            Self::QUORUM => Quorum::Quorum,
            Self::ALL => Quorum::All,
            Self::DEFAULT => Quorum::Default,
            n => Quorum::Count(n),
        }
    }
}

impl From<u32> for Quorum {
    fn from(n: u32) -> Self {
        Quorum::Count(n)
    }
}
