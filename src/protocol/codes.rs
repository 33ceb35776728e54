//! Message codes
//!
//! One-byte identifiers for every Riak PBC request and response kind.

use std::fmt;

/// Riak PBC message codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageCode {
    ErrorResp = 0,
    PingReq = 1,
    PingResp = 2,
    GetClientIdReq = 3,
    GetClientIdResp = 4,
    SetClientIdReq = 5,
    SetClientIdResp = 6,
    GetServerInfoReq = 7,
    GetServerInfoResp = 8,
    GetReq = 9,
    GetResp = 10,
    PutReq = 11,
    PutResp = 12,
    DelReq = 13,
    DelResp = 14,
    ListBucketsReq = 15,
    ListBucketsResp = 16,
    ListKeysReq = 17,
    ListKeysResp = 18,
    GetBucketReq = 19,
    GetBucketResp = 20,
    SetBucketReq = 21,
    SetBucketResp = 22,
    MapRedReq = 23,
    MapRedResp = 24,
    IndexReq = 25,
    IndexResp = 26,
    SearchQueryReq = 27,
    SearchQueryResp = 28,
    ResetBucketReq = 29,
    ResetBucketResp = 30,
    GetBucketTypeReq = 31,
    SetBucketTypeReq = 32,
    CounterUpdateReq = 50,
    CounterUpdateResp = 51,
    CounterGetReq = 52,
    CounterGetResp = 53,
    YokozunaIndexGetReq = 54,
    YokozunaIndexGetResp = 55,
    YokozunaIndexPutReq = 56,
    YokozunaIndexDeleteReq = 57,
    YokozunaSchemaGetReq = 58,
    YokozunaSchemaGetResp = 59,
    YokozunaSchemaPutReq = 60,
    DtFetchReq = 80,
    DtFetchResp = 81,
    DtUpdateReq = 82,
    DtUpdateResp = 83,
    AuthReq = 253,
    AuthResp = 254,
    StartTls = 255,
}

impl MessageCode {
    /// Every known code, in wire order
    pub const ALL: [MessageCode; 51] = [
        MessageCode::ErrorResp,
        MessageCode::PingReq,
        MessageCode::PingResp,
        MessageCode::GetClientIdReq,
        MessageCode::GetClientIdResp,
        MessageCode::SetClientIdReq,
        MessageCode::SetClientIdResp,
        MessageCode::GetServerInfoReq,
        MessageCode::GetServerInfoResp,
        MessageCode::GetReq,
        MessageCode::GetResp,
        MessageCode::PutReq,
        MessageCode::PutResp,
        MessageCode::DelReq,
        MessageCode::DelResp,
        MessageCode::ListBucketsReq,
        MessageCode::ListBucketsResp,
        MessageCode::ListKeysReq,
        MessageCode::ListKeysResp,
        MessageCode::GetBucketReq,
        MessageCode::GetBucketResp,
        MessageCode::SetBucketReq,
        MessageCode::SetBucketResp,
        MessageCode::MapRedReq,
        MessageCode::MapRedResp,
        MessageCode::IndexReq,
        MessageCode::IndexResp,
        MessageCode::SearchQueryReq,
        MessageCode::SearchQueryResp,
        MessageCode::ResetBucketReq,
        MessageCode::ResetBucketResp,
        MessageCode::GetBucketTypeReq,
        MessageCode::SetBucketTypeReq,
        MessageCode::CounterUpdateReq,
        MessageCode::CounterUpdateResp,
        MessageCode::CounterGetReq,
        MessageCode::CounterGetResp,
        MessageCode::YokozunaIndexGetReq,
        MessageCode::YokozunaIndexGetResp,
        MessageCode::YokozunaIndexPutReq,
        MessageCode::YokozunaIndexDeleteReq,
        MessageCode::YokozunaSchemaGetReq,
        MessageCode::YokozunaSchemaGetResp,
        MessageCode::YokozunaSchemaPutReq,
        MessageCode::DtFetchReq,
        MessageCode::DtFetchResp,
        MessageCode::DtUpdateReq,
        MessageCode::DtUpdateResp,
        MessageCode::AuthReq,
        MessageCode::AuthResp,
        MessageCode::StartTls,
    ];

    /// Look up a code received off the wire. Unknown bytes yield `None`.
    pub fn from_u8(byte: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| *code as u8 == byte)
    }

    /// Raw wire byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<MessageCode> for u8 {
    fn from(code: MessageCode) -> Self {
        code as u8
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, *self as u8)
    }
}
