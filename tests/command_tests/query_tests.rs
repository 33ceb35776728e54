//! Query and Listing Command Tests

#[path = "../common/mod.rs"]
mod common;

use common::{Call, MemoryConnector, RecordingExchange};
use riakwire::command::bucket::ListBuckets;
use riakwire::command::query::{QueryIndex, Search};
use riakwire::message::{
    IndexEntry, IndexQuery, IndexQueryRequest, ListBucketsRequest, SearchRequest,
};
use riakwire::protocol::messages::{
    IndexQueryType, RpbIndexReq, RpbIndexResp, RpbListBucketsResp, RpbPair, RpbSearchDoc,
    RpbSearchQueryResp,
};
use riakwire::protocol::{MessageCode, ResponseMessage};
use riakwire::{Exchange, Operation, ProtoClient, RiakError};

fn pair(key: &str, value: &str) -> RpbPair {
    RpbPair {
        key: key.as_bytes().to_vec(),
        value: Some(value.as_bytes().to_vec()),
    }
}

// =============================================================================
// Secondary Index Tests
// =============================================================================

#[test]
fn test_match_query_message() {
    let request = IndexQueryRequest {
        bucket: "users".to_string(),
        index: "email_bin".to_string(),
        query: IndexQuery::Match("alice@example.com".to_string()),
        ..Default::default()
    };

    let message = QueryIndex::create_request_message(&request);

    assert_eq!(message.bucket, b"users");
    assert_eq!(message.index, b"email_bin");
    assert_eq!(message.qtype, IndexQueryType::Eq as i32);
    assert_eq!(message.key.as_deref(), Some(&b"alice@example.com"[..]));
    assert_eq!(message.range_min, None);
    assert_eq!(message.range_max, None);
    assert_eq!(message.stream, None);
    assert_eq!(message.r#type, None);
}

#[test]
fn test_range_query_message() {
    let request = IndexQueryRequest {
        bucket: "users".to_string(),
        bucket_type: Some("indexed".to_string()),
        index: "age_int".to_string(),
        query: IndexQuery::Range {
            min: "18".to_string(),
            max: "30".to_string(),
        },
        return_terms: Some(true),
        max_results: Some(100),
        ..Default::default()
    };

    let message = QueryIndex::create_request_message(&request);

    assert_eq!(message.qtype, IndexQueryType::Range as i32);
    assert_eq!(message.key, None);
    assert_eq!(message.range_min.as_deref(), Some(&b"18"[..]));
    assert_eq!(message.range_max.as_deref(), Some(&b"30"[..]));
    assert_eq!(message.return_terms, Some(true));
    assert_eq!(message.max_results, Some(100));
    assert_eq!(message.r#type.as_deref(), Some(&b"indexed"[..]));
}

#[test]
fn test_index_response_with_terms() {
    let reply = RpbIndexResp {
        results: vec![pair("21", "bob"), pair("25", "carol")],
        continuation: Some(b"next-page".to_vec()),
        ..Default::default()
    };
    let mut exchange = RecordingExchange::replying(Some(ResponseMessage::Index(reply)));

    let response = exchange
        .execute::<QueryIndex>(&IndexQueryRequest::default())
        .unwrap();

    assert_eq!(
        response.entries,
        vec![
            IndexEntry {
                key: "bob".to_string(),
                term: Some("21".to_string()),
            },
            IndexEntry {
                key: "carol".to_string(),
                term: Some("25".to_string()),
            },
        ]
    );
    assert_eq!(response.continuation.as_deref(), Some(&b"next-page"[..]));
}

#[test]
fn test_index_response_keys_only() {
    let reply = RpbIndexResp {
        keys: vec![b"alice".to_vec()],
        ..Default::default()
    };
    let mut exchange = RecordingExchange::replying(Some(ResponseMessage::Index(reply)));

    let response = exchange
        .execute::<QueryIndex>(&IndexQueryRequest::default())
        .unwrap();

    assert_eq!(response.entries.len(), 1);
    assert_eq!(response.entries[0].key, "alice");
    assert_eq!(response.entries[0].term, None);
    assert_eq!(response.continuation, None);

    let sent: RpbIndexReq = exchange.sent();
    assert_eq!(sent.qtype, IndexQueryType::Eq as i32);
}

#[test]
fn test_index_reply_of_wrong_type() {
    let mut exchange = RecordingExchange::replying(Some(ResponseMessage::ListBuckets(
        RpbListBucketsResp::default(),
    )));

    let result = exchange.execute::<QueryIndex>(&IndexQueryRequest::default());
    assert!(matches!(result, Err(RiakError::Protocol(_))));
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_message() {
    let request = SearchRequest {
        rows: Some(10),
        default_field: Some("name_s".to_string()),
        return_fields: vec!["name_s".to_string(), "age_i".to_string()],
        ..SearchRequest::new("people", "name_s:ali*")
    };

    let message = Search::create_request_message(&request);

    assert_eq!(message.index, b"people");
    assert_eq!(message.q, b"name_s:ali*");
    assert_eq!(message.rows, Some(10));
    assert_eq!(message.start, None);
    assert_eq!(message.df.as_deref(), Some(&b"name_s"[..]));
    assert_eq!(message.op, None);
    assert_eq!(message.fl, vec![b"name_s".to_vec(), b"age_i".to_vec()]);
}

#[test]
fn test_search_response_groups_field_values() {
    let reply = RpbSearchQueryResp {
        docs: vec![RpbSearchDoc {
            fields: vec![
                pair("name_s", "alice"),
                pair("tag_ss", "admin"),
                pair("tag_ss", "ops"),
            ],
        }],
        max_score: Some(1.5),
        num_found: Some(1),
    };
    let mut exchange = RecordingExchange::replying(Some(ResponseMessage::SearchQuery(reply)));

    let response = exchange
        .execute::<Search>(&SearchRequest::new("people", "*:*"))
        .unwrap();

    assert_eq!(response.num_found, 1);
    assert_eq!(response.max_score, Some(1.5));
    assert_eq!(response.docs.len(), 1);

    let fields = &response.docs[0].fields;
    assert_eq!(fields["name_s"], vec!["alice"]);
    assert_eq!(fields["tag_ss"], vec!["admin", "ops"]);
}

#[test]
fn test_search_over_connection() {
    let (connector, wire) = MemoryConnector::new();
    let mut client = ProtoClient::with_connector(connector);
    wire.push_message(MessageCode::SearchQueryResp, &RpbSearchQueryResp::default());

    let response = client
        .execute::<Search>(&SearchRequest::new("people", "*:*"))
        .unwrap();

    assert_eq!(response.num_found, 0);
    assert!(response.docs.is_empty());
    assert_eq!(wire.sent_frames()[0].code, MessageCode::SearchQueryReq.as_u8());
}

// =============================================================================
// Bucket Listing Tests
// =============================================================================

#[test]
fn test_list_buckets() {
    let reply = RpbListBucketsResp {
        buckets: vec![b"users".to_vec(), b"sessions".to_vec()],
        done: None,
    };
    let mut exchange = RecordingExchange::replying(Some(ResponseMessage::ListBuckets(reply)));

    let request = ListBucketsRequest {
        bucket_type: Some("maps".to_string()),
        timeout: Some(5000),
    };
    let response = exchange.execute::<ListBuckets>(&request).unwrap();

    assert_eq!(response.buckets, vec!["users", "sessions"]);
    match &exchange.calls[..] {
        [Call::Send {
            request_code,
            expected_code,
            ..
        }] => {
            assert_eq!(*request_code, MessageCode::ListBucketsReq);
            assert_eq!(*expected_code, MessageCode::ListBucketsResp);
        }
        other => panic!("Expected one send, got {:?}", other),
    }

    let sent: riakwire::protocol::messages::RpbListBucketsReq = exchange.sent();
    assert_eq!(sent.stream, None);
    assert_eq!(sent.timeout, Some(5000));
    assert_eq!(sent.r#type.as_deref(), Some(&b"maps"[..]));
}
