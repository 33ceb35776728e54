//! Secondary index (2i) and full-text search queries

use std::collections::BTreeMap;

use super::{bytes, opt_bytes, string, typed_body, Operation};
use crate::error::Result;
use crate::message::{
    IndexEntry, IndexQuery, IndexQueryRequest, IndexQueryResponse, SearchDoc, SearchRequest,
    SearchResponse,
};
use crate::protocol::messages::{
    IndexQueryType, RpbIndexReq, RpbIndexResp, RpbSearchQueryReq, RpbSearchQueryResp,
};
use crate::protocol::{MessageCode, ResponseMessage};

/// `INDEX_REQ` → `INDEX_RESP`
pub struct QueryIndex;

impl Operation for QueryIndex {
    type Request = IndexQueryRequest;
    type Response = IndexQueryResponse;
    type WireRequest = RpbIndexReq;

    const REQUEST_CODE: MessageCode = MessageCode::IndexReq;
    const RESPONSE_CODE: MessageCode = MessageCode::IndexResp;

    fn create_request_message(request: &IndexQueryRequest) -> RpbIndexReq {
        let (qtype, key, range_min, range_max) = match &request.query {
            IndexQuery::Match(term) => (IndexQueryType::Eq, Some(bytes(term)), None, None),
            IndexQuery::Range { min, max } => {
                (IndexQueryType::Range, None, Some(bytes(min)), Some(bytes(max)))
            }
        };

        RpbIndexReq {
            bucket: bytes(&request.bucket),
            index: bytes(&request.index),
            qtype: qtype as i32,
            key,
            range_min,
            range_max,
            return_terms: request.return_terms,
            stream: None,
            max_results: request.max_results,
            continuation: request.continuation.clone(),
            timeout: request.timeout,
            r#type: opt_bytes(&request.bucket_type),
            term_regex: opt_bytes(&request.term_regex),
            pagination_sort: request.pagination_sort,
        }
    }

    fn create_response(message: Option<ResponseMessage>) -> Result<IndexQueryResponse> {
        let resp: RpbIndexResp = typed_body(message, Self::RESPONSE_CODE)?;

        // With return_terms the node answers in `results` (term → key)
        let mut entries: Vec<IndexEntry> = resp
            .results
            .into_iter()
            .map(|pair| IndexEntry {
                key: pair.value.map(string).unwrap_or_default(),
                term: Some(string(pair.key)),
            })
            .collect();
        entries.extend(resp.keys.into_iter().map(|key| IndexEntry {
            key: string(key),
            term: None,
        }));

        Ok(IndexQueryResponse {
            entries,
            continuation: resp.continuation,
        })
    }
}

/// `SEARCH_QUERY_REQ` → `SEARCH_QUERY_RESP`
pub struct Search;

impl Operation for Search {
    type Request = SearchRequest;
    type Response = SearchResponse;
    type WireRequest = RpbSearchQueryReq;

    const REQUEST_CODE: MessageCode = MessageCode::SearchQueryReq;
    const RESPONSE_CODE: MessageCode = MessageCode::SearchQueryResp;

    fn create_request_message(request: &SearchRequest) -> RpbSearchQueryReq {
        RpbSearchQueryReq {
            q: bytes(&request.query),
            index: bytes(&request.index),
            rows: request.rows,
            start: request.start,
            sort: opt_bytes(&request.sort),
            filter: opt_bytes(&request.filter),
            df: opt_bytes(&request.default_field),
            op: opt_bytes(&request.default_operation),
            fl: request.return_fields.iter().map(|f| bytes(f)).collect(),
            presort: opt_bytes(&request.presort),
        }
    }

    fn create_response(message: Option<ResponseMessage>) -> Result<SearchResponse> {
        let resp: RpbSearchQueryResp = typed_body(message, Self::RESPONSE_CODE)?;

        let docs = resp
            .docs
            .into_iter()
            .map(|doc| {
                let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for pair in doc.fields {
                    fields
                        .entry(string(pair.key))
                        .or_default()
                        .push(pair.value.map(string).unwrap_or_default());
                }
                SearchDoc { fields }
            })
            .collect();

        Ok(SearchResponse {
            docs,
            max_score: resp.max_score,
            num_found: resp.num_found.unwrap_or(0),
        })
    }
}
