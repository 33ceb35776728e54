//! Bucket listing

use super::{opt_bytes, string, typed_body, Operation};
use crate::error::Result;
use crate::message::{ListBucketsRequest, ListBucketsResponse};
use crate::protocol::messages::{RpbListBucketsReq, RpbListBucketsResp};
use crate::protocol::{MessageCode, ResponseMessage};

/// `LIST_BUCKETS_REQ` → `LIST_BUCKETS_RESP`, non-streamed
pub struct ListBuckets;

impl Operation for ListBuckets {
    type Request = ListBucketsRequest;
    type Response = ListBucketsResponse;
    type WireRequest = RpbListBucketsReq;

    const REQUEST_CODE: MessageCode = MessageCode::ListBucketsReq;
    const RESPONSE_CODE: MessageCode = MessageCode::ListBucketsResp;

    fn create_request_message(request: &ListBucketsRequest) -> RpbListBucketsReq {
        RpbListBucketsReq {
            timeout: request.timeout,
            stream: None,
            r#type: opt_bytes(&request.bucket_type),
        }
    }

    fn create_response(message: Option<ResponseMessage>) -> Result<ListBucketsResponse> {
        let resp: RpbListBucketsResp = typed_body(message, Self::RESPONSE_CODE)?;

        Ok(ListBucketsResponse {
            buckets: resp.buckets.into_iter().map(string).collect(),
        })
    }
}
