//! Key/value commands: fetch, store, delete and key listing

use super::{bytes, opt_bytes, opt_string, string, typed_body, Operation};
use crate::client::Exchange;
use crate::error::Result;
use crate::message::{
    Content, DeleteRequest, DeleteResponse, GetRequest, GetResponse, Link, ListKeysRequest,
    ListKeysResponse, PutRequest, PutResponse, Quorum,
};
use crate::protocol::messages::{
    RpbContent, RpbDelReq, RpbGetReq, RpbGetResp, RpbLink, RpbListKeysReq, RpbListKeysResp,
    RpbPair, RpbPutReq, RpbPutResp,
};
use crate::protocol::{MessageCode, ResponseMessage};

fn quorum(value: Option<Quorum>) -> Option<u32> {
    value.map(Quorum::to_wire)
}

// =============================================================================
// Content mapping
// =============================================================================

pub(crate) fn content_to_wire(content: &Content) -> RpbContent {
    RpbContent {
        value: content.value.clone(),
        content_type: opt_bytes(&content.content_type),
        charset: opt_bytes(&content.charset),
        content_encoding: opt_bytes(&content.content_encoding),
        vtag: opt_bytes(&content.vtag),
        links: content
            .links
            .iter()
            .map(|link| RpbLink {
                bucket: opt_bytes(&link.bucket),
                key: opt_bytes(&link.key),
                tag: opt_bytes(&link.tag),
            })
            .collect(),
        last_mod: content.last_modified,
        last_mod_usecs: content.last_modified_usecs,
        usermeta: content
            .user_meta
            .iter()
            .map(|(k, v)| RpbPair {
                key: bytes(k),
                value: Some(bytes(v)),
            })
            .collect(),
        indexes: content
            .indexes
            .iter()
            .map(|(k, v)| RpbPair {
                key: bytes(k),
                value: Some(bytes(v)),
            })
            .collect(),
        deleted: content.deleted.then_some(true),
    }
}

pub(crate) fn content_from_wire(content: RpbContent) -> Content {
    Content {
        value: content.value,
        content_type: opt_string(content.content_type),
        charset: opt_string(content.charset),
        content_encoding: opt_string(content.content_encoding),
        vtag: opt_string(content.vtag),
        last_modified: content.last_mod,
        last_modified_usecs: content.last_mod_usecs,
        user_meta: content
            .usermeta
            .into_iter()
            .map(|pair| (string(pair.key), pair.value.map(string).unwrap_or_default()))
            .collect(),
        indexes: content
            .indexes
            .into_iter()
            .map(|pair| (string(pair.key), pair.value.map(string).unwrap_or_default()))
            .collect(),
        links: content
            .links
            .into_iter()
            .map(|link| Link {
                bucket: opt_string(link.bucket),
                key: opt_string(link.key),
                tag: opt_string(link.tag),
            })
            .collect(),
        deleted: content.deleted.unwrap_or(false),
    }
}

// =============================================================================
// Delete
// =============================================================================

/// `DEL_REQ` → `DEL_RESP` (no body)
pub struct Delete;

impl Operation for Delete {
    type Request = DeleteRequest;
    type Response = DeleteResponse;
    type WireRequest = RpbDelReq;

    const REQUEST_CODE: MessageCode = MessageCode::DelReq;
    const RESPONSE_CODE: MessageCode = MessageCode::DelResp;

    fn create_request_message(request: &DeleteRequest) -> RpbDelReq {
        RpbDelReq {
            bucket: bytes(&request.bucket),
            key: bytes(&request.key),
            r#type: opt_bytes(&request.bucket_type),
            vclock: request.vclock.clone(),
            r: quorum(request.r),
            pr: quorum(request.pr),
            rw: quorum(request.rw),
            w: quorum(request.w),
            dw: quorum(request.dw),
            pw: quorum(request.pw),
            timeout: request.timeout,
            sloppy_quorum: request.sloppy_quorum,
            n_val: request.n_val,
        }
    }

    fn create_response(_message: Option<ResponseMessage>) -> Result<DeleteResponse> {
        Ok(DeleteResponse)
    }
}

// =============================================================================
// Get
// =============================================================================

/// `GET_REQ` → `GET_RESP`
pub struct Get;

impl Operation for Get {
    type Request = GetRequest;
    type Response = GetResponse;
    type WireRequest = RpbGetReq;

    const REQUEST_CODE: MessageCode = MessageCode::GetReq;
    const RESPONSE_CODE: MessageCode = MessageCode::GetResp;

    fn create_request_message(request: &GetRequest) -> RpbGetReq {
        RpbGetReq {
            bucket: bytes(&request.bucket),
            key: bytes(&request.key),
            r#type: opt_bytes(&request.bucket_type),
            r: quorum(request.r),
            pr: quorum(request.pr),
            basic_quorum: request.basic_quorum,
            notfound_ok: request.notfound_ok,
            if_modified: request.if_modified.clone(),
            head: request.head,
            deletedvclock: request.deleted_vclock,
            timeout: request.timeout,
            sloppy_quorum: request.sloppy_quorum,
            n_val: request.n_val,
        }
    }

    fn create_response(message: Option<ResponseMessage>) -> Result<GetResponse> {
        let resp: RpbGetResp = typed_body(message, Self::RESPONSE_CODE)?;

        Ok(GetResponse {
            vclock: resp.vclock,
            unchanged: resp.unchanged.unwrap_or(false),
            content: resp.content.into_iter().map(content_from_wire).collect(),
        })
    }
}

// =============================================================================
// Put
// =============================================================================

/// `PUT_REQ` → `PUT_RESP`
pub struct Put;

impl Operation for Put {
    type Request = PutRequest;
    type Response = PutResponse;
    type WireRequest = RpbPutReq;

    const REQUEST_CODE: MessageCode = MessageCode::PutReq;
    const RESPONSE_CODE: MessageCode = MessageCode::PutResp;

    fn create_request_message(request: &PutRequest) -> RpbPutReq {
        RpbPutReq {
            bucket: bytes(&request.bucket),
            key: opt_bytes(&request.key),
            r#type: opt_bytes(&request.bucket_type),
            vclock: request.vclock.clone(),
            content: Some(content_to_wire(&request.content)),
            w: quorum(request.w),
            dw: quorum(request.dw),
            pw: quorum(request.pw),
            return_body: request.return_body,
            return_head: request.return_head,
            if_not_modified: request.if_not_modified,
            if_none_match: request.if_none_match,
            timeout: request.timeout,
            asis: request.asis,
            sloppy_quorum: request.sloppy_quorum,
            n_val: request.n_val,
        }
    }

    fn create_response(message: Option<ResponseMessage>) -> Result<PutResponse> {
        let resp: RpbPutResp = typed_body(message, Self::RESPONSE_CODE)?;

        Ok(PutResponse {
            vclock: resp.vclock,
            key: opt_string(resp.key),
            content: resp.content.into_iter().map(content_from_wire).collect(),
        })
    }
}

// =============================================================================
// List keys
// =============================================================================

/// `LIST_KEYS_REQ` → streamed `LIST_KEYS_RESP` frames
///
/// The node answers with as many response frames as it needs and marks
/// the last one `done`, so the request is emitted and the replies are
/// received one frame at a time.
pub struct ListKeys;

impl Operation for ListKeys {
    type Request = ListKeysRequest;
    type Response = ListKeysResponse;
    type WireRequest = RpbListKeysReq;

    const REQUEST_CODE: MessageCode = MessageCode::ListKeysReq;
    const RESPONSE_CODE: MessageCode = MessageCode::ListKeysResp;

    fn create_request_message(request: &ListKeysRequest) -> RpbListKeysReq {
        RpbListKeysReq {
            bucket: bytes(&request.bucket),
            r#type: opt_bytes(&request.bucket_type),
            timeout: request.timeout,
        }
    }

    /// Keys carried by a single response frame
    fn create_response(message: Option<ResponseMessage>) -> Result<ListKeysResponse> {
        let resp: RpbListKeysResp = typed_body(message, Self::RESPONSE_CODE)?;

        Ok(ListKeysResponse {
            keys: resp.keys.into_iter().map(string).collect(),
        })
    }

    fn execute<E: Exchange>(client: &mut E, request: &ListKeysRequest) -> Result<ListKeysResponse> {
        client.emit(&Self::create_request_message(request), Self::REQUEST_CODE)?;

        let mut keys = Vec::new();
        loop {
            let resp: RpbListKeysResp = client.receive_message(Self::RESPONSE_CODE)?.try_into()?;
            let done = resp.done.unwrap_or(false);
            keys.extend(resp.keys.into_iter().map(string));

            if done {
                break;
            }
        }

        tracing::debug!("Listed {} keys in bucket {}", keys.len(), request.bucket);
        Ok(ListKeysResponse { keys })
    }
}
