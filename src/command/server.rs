//! Node-level commands

use super::{opt_string, typed_body, Operation};
use crate::error::Result;
use crate::message::ServerInfo;
use crate::protocol::messages::{RpbEmpty, RpbGetServerInfoResp};
use crate::protocol::{MessageCode, ResponseMessage};

/// `PING_REQ` → `PING_RESP` (health check, no bodies)
pub struct Ping;

impl Operation for Ping {
    type Request = ();
    type Response = ();
    type WireRequest = RpbEmpty;

    const REQUEST_CODE: MessageCode = MessageCode::PingReq;
    const RESPONSE_CODE: MessageCode = MessageCode::PingResp;

    fn create_request_message(_request: &()) -> RpbEmpty {
        RpbEmpty {}
    }

    fn create_response(_message: Option<ResponseMessage>) -> Result<()> {
        Ok(())
    }
}

/// `GET_SERVER_INFO_REQ` → `GET_SERVER_INFO_RESP`
pub struct GetServerInfo;

impl Operation for GetServerInfo {
    type Request = ();
    type Response = ServerInfo;
    type WireRequest = RpbEmpty;

    const REQUEST_CODE: MessageCode = MessageCode::GetServerInfoReq;
    const RESPONSE_CODE: MessageCode = MessageCode::GetServerInfoResp;

    fn create_request_message(_request: &()) -> RpbEmpty {
        RpbEmpty {}
    }

    fn create_response(message: Option<ResponseMessage>) -> Result<ServerInfo> {
        let resp: RpbGetServerInfoResp = typed_body(message, Self::RESPONSE_CODE)?;

        Ok(ServerInfo {
            node: opt_string(resp.node),
            server_version: opt_string(resp.server_version),
        })
    }
}
