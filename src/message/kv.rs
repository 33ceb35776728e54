//! Key/value messages

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Quorum;

/// A link from one object to another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub tag: Option<String>,
}

/// One sibling of a stored object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub value: Vec<u8>,
    pub content_type: Option<String>,
    pub charset: Option<String>,
    pub content_encoding: Option<String>,
    pub vtag: Option<String>,
    /// Seconds part of the last-modified timestamp
    pub last_modified: Option<u32>,
    pub last_modified_usecs: Option<u32>,
    pub user_meta: BTreeMap<String, String>,
    /// Secondary index entries; a name may repeat
    pub indexes: Vec<(String, String)>,
    pub links: Vec<Link>,
    pub deleted: bool,
}

impl Content {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_index(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.indexes.push((name.into(), value.into()));
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_meta.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Delete
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub bucket: String,
    pub bucket_type: Option<String>,
    pub key: String,
    /// Opaque vector clock from a previous fetch
    pub vclock: Option<Vec<u8>>,
    pub r: Option<Quorum>,
    pub pr: Option<Quorum>,
    pub rw: Option<Quorum>,
    pub w: Option<Quorum>,
    pub dw: Option<Quorum>,
    pub pw: Option<Quorum>,
    pub timeout: Option<u32>,
    pub sloppy_quorum: Option<bool>,
    pub n_val: Option<u32>,
}

impl DeleteRequest {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            ..Self::default()
        }
    }
}

/// Acknowledgement of a delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse;

// =============================================================================
// Get
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRequest {
    pub bucket: String,
    pub bucket_type: Option<String>,
    pub key: String,
    pub r: Option<Quorum>,
    pub pr: Option<Quorum>,
    pub basic_quorum: Option<bool>,
    pub notfound_ok: Option<bool>,
    /// Only return the object when its vclock differs from this one
    pub if_modified: Option<Vec<u8>>,
    pub head: Option<bool>,
    pub deleted_vclock: Option<bool>,
    pub timeout: Option<u32>,
    pub sloppy_quorum: Option<bool>,
    pub n_val: Option<u32>,
}

impl GetRequest {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    pub vclock: Option<Vec<u8>>,
    pub unchanged: bool,
    pub content: Vec<Content>,
}

impl GetResponse {
    /// The node answered but holds no object under the key
    pub fn is_not_found(&self) -> bool {
        self.content.is_empty() && self.vclock.is_none() && !self.unchanged
    }

    /// More than one sibling was returned
    pub fn has_siblings(&self) -> bool {
        self.content.len() > 1
    }
}

// =============================================================================
// Put
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutRequest {
    pub bucket: String,
    pub bucket_type: Option<String>,
    /// `None` lets the node generate a key
    pub key: Option<String>,
    pub vclock: Option<Vec<u8>>,
    pub content: Content,
    pub w: Option<Quorum>,
    pub dw: Option<Quorum>,
    pub pw: Option<Quorum>,
    pub return_body: Option<bool>,
    pub return_head: Option<bool>,
    pub if_not_modified: Option<bool>,
    pub if_none_match: Option<bool>,
    pub timeout: Option<u32>,
    pub sloppy_quorum: Option<bool>,
    pub n_val: Option<u32>,
    pub asis: Option<bool>,
}

impl PutRequest {
    pub fn new(bucket: impl Into<String>, key: Option<String>, content: Content) -> Self {
        Self {
            bucket: bucket.into(),
            key,
            content,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutResponse {
    pub vclock: Option<Vec<u8>>,
    /// Set when the node generated the key
    pub key: Option<String>,
    pub content: Vec<Content>,
}

// =============================================================================
// List keys
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKeysRequest {
    pub bucket: String,
    pub bucket_type: Option<String>,
    pub timeout: Option<u32>,
}

impl ListKeysRequest {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListKeysResponse {
    pub keys: Vec<String>,
}
