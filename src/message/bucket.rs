//! Bucket listing messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBucketsRequest {
    /// Bucket type to list; the node's default type when `None`
    pub bucket_type: Option<String>,
    pub timeout: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBucketsResponse {
    pub buckets: Vec<String>,
}
