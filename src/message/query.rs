//! Secondary index and search messages

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What a secondary index query matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexQuery {
    /// Exact term
    Match(String),
    /// Inclusive term range
    Range { min: String, max: String },
}

impl Default for IndexQuery {
    fn default() -> Self {
        IndexQuery::Match(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexQueryRequest {
    pub bucket: String,
    pub bucket_type: Option<String>,
    /// Index name including its `_bin` / `_int` suffix
    pub index: String,
    pub query: IndexQuery,
    pub return_terms: Option<bool>,
    pub max_results: Option<u32>,
    pub continuation: Option<Vec<u8>>,
    pub timeout: Option<u32>,
    pub term_regex: Option<String>,
    pub pagination_sort: Option<bool>,
}

/// One matching object key, with its term when terms were requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: String,
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexQueryResponse {
    pub entries: Vec<IndexEntry>,
    /// Resume token when results were paginated
    pub continuation: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub index: String,
    pub query: String,
    pub rows: Option<u32>,
    pub start: Option<u32>,
    pub sort: Option<String>,
    pub filter: Option<String>,
    pub default_field: Option<String>,
    pub default_operation: Option<String>,
    pub return_fields: Vec<String>,
    pub presort: Option<String>,
}

impl SearchRequest {
    pub fn new(index: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            query: query.into(),
            ..Self::default()
        }
    }
}

/// One search hit; a field may carry several values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDoc {
    pub fields: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub docs: Vec<SearchDoc>,
    pub max_score: Option<f32>,
    pub num_found: u32,
}
