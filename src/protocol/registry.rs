//! Response registry
//!
//! Maps a response code to the message type that decodes its body. The
//! default table is built from an ordered list of `(code, decoder)` pairs;
//! codes absent from the table have no typed body (acknowledgement-only
//! responses such as `DEL_RESP` and `PING_RESP`).

use prost::Message;

use super::codes::MessageCode;
use super::messages::{
    DtFetchResp, DtUpdateResp, RpbErrorResp, RpbGetBucketResp, RpbGetResp, RpbGetServerInfoResp,
    RpbIndexResp, RpbListBucketsResp, RpbListKeysResp, RpbPutResp, RpbSearchQueryResp,
    RpbYokozunaIndexGetResp, RpbYokozunaSchemaGetResp,
};
use crate::error::{Result, RiakError};

/// Decodes a response body into its registered message type
pub type ResponseDecoder = fn(&[u8]) -> std::result::Result<ResponseMessage, prost::DecodeError>;

macro_rules! response_messages {
    ($($variant:ident($ty:ty) => $code:ident),* $(,)?) => {
        /// A decoded response body, one variant per registered type
        #[derive(Debug, Clone, PartialEq)]
        pub enum ResponseMessage {
            $($variant($ty)),*
        }

        impl ResponseMessage {
            /// Code the message type is registered under
            pub fn code(&self) -> MessageCode {
                match self {
                    $(ResponseMessage::$variant(_) => MessageCode::$code),*
                }
            }
        }

        $(
            impl From<$ty> for ResponseMessage {
                fn from(message: $ty) -> Self {
                    ResponseMessage::$variant(message)
                }
            }

            impl TryFrom<ResponseMessage> for $ty {
                type Error = RiakError;

                fn try_from(message: ResponseMessage) -> Result<Self> {
                    match message {
                        ResponseMessage::$variant(inner) => Ok(inner),
                        other => Err(RiakError::Protocol(format!(
                            "expected {} body, got {}",
                            MessageCode::$code,
                            other.code()
                        ))),
                    }
                }
            }
        )*

        /// Default `(code, decoder)` table, in wire order
        pub const DEFAULT_RESPONSE_TYPES: &[(MessageCode, ResponseDecoder)] = &[
            $((MessageCode::$code, decode_as::<$ty>)),*
        ];
    };
}

response_messages! {
    Error(RpbErrorResp) => ErrorResp,
    ServerInfo(RpbGetServerInfoResp) => GetServerInfoResp,
    Get(RpbGetResp) => GetResp,
    Put(RpbPutResp) => PutResp,
    ListBuckets(RpbListBucketsResp) => ListBucketsResp,
    ListKeys(RpbListKeysResp) => ListKeysResp,
    GetBucket(RpbGetBucketResp) => GetBucketResp,
    Index(RpbIndexResp) => IndexResp,
    SearchQuery(RpbSearchQueryResp) => SearchQueryResp,
    YokozunaIndexGet(RpbYokozunaIndexGetResp) => YokozunaIndexGetResp,
    YokozunaSchemaGet(RpbYokozunaSchemaGetResp) => YokozunaSchemaGetResp,
    DtFetch(DtFetchResp) => DtFetchResp,
    DtUpdate(DtUpdateResp) => DtUpdateResp,
}

fn decode_as<T>(bytes: &[u8]) -> std::result::Result<ResponseMessage, prost::DecodeError>
where
    T: Message + Default + Into<ResponseMessage>,
{
    T::decode(bytes).map(Into::into)
}

/// Code → decoder lookup table
#[derive(Clone)]
pub struct ResponseRegistry {
    decoders: [Option<ResponseDecoder>; 256],
}

impl ResponseRegistry {
    /// A registry with no decoders at all
    pub fn empty() -> Self {
        Self {
            decoders: [None; 256],
        }
    }

    /// Register (or replace) the decoder for `code`
    pub fn register(&mut self, code: u8, decoder: ResponseDecoder) -> &mut Self {
        self.decoders[code as usize] = Some(decoder);
        self
    }

    /// Decoder registered for `code`, if any
    pub fn lookup(&self, code: u8) -> Option<ResponseDecoder> {
        self.decoders[code as usize]
    }

    pub fn contains(&self, code: u8) -> bool {
        self.lookup(code).is_some()
    }

    /// Codes that carry a typed body
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.decoders
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_some())
            .map(|(code, _)| code as u8)
    }

    /// Decode `bytes` with the decoder registered for `code`.
    ///
    /// `Ok(None)` when nothing is registered.
    pub fn decode(&self, code: u8, bytes: &[u8]) -> Result<Option<ResponseMessage>> {
        match self.lookup(code) {
            Some(decoder) => Ok(Some(decoder(bytes)?)),
            None => Ok(None),
        }
    }
}

impl Default for ResponseRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (code, decoder) in DEFAULT_RESPONSE_TYPES {
            registry.register(code.as_u8(), *decoder);
        }
        registry
    }
}

impl std::fmt::Debug for ResponseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseRegistry")
            .field("codes", &self.codes().collect::<Vec<_>>())
            .finish()
    }
}
