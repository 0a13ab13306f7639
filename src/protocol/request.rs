use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::message::EventMeshMessage;
use crate::utils::ProducerError;

pub const LANGUAGE: &str = "RUST";
pub const PROTOCOL_VERSION: &str = "V1";

/// Request codes understood by the broker's HTTP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCode {
    /// Publish; the broker acknowledges acceptance only.
    MsgSendAsync,
    /// Request/reply; the broker holds the call until a reply is available.
    MsgSendSync,
}

impl RequestCode {
    pub fn as_i32(self) -> i32 {
        match self {
            Self::MsgSendAsync => 104,
            Self::MsgSendSync => 101,
        }
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Per-client metadata sent with every call. The codec passes it through
/// untouched; its values come from the resolved producer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMetadata {
    pub client_id: String,
    pub language: String,
    pub version: String,
    pub env: String,
    pub idc: String,
    pub ip: String,
    pub pid: String,
    pub sys: String,
    pub username: String,
    pub passwd: String,
    pub producer_group: String,
}

impl Default for CallMetadata {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            language: LANGUAGE.to_string(),
            version: PROTOCOL_VERSION.to_string(),
            env: String::new(),
            idc: String::new(),
            ip: String::new(),
            pid: String::new(),
            sys: String::new(),
            username: String::new(),
            passwd: String::new(),
            producer_group: String::new(),
        }
    }
}

/// Outer JSON request body. Borrows everything from the caller's message so
/// encoding never copies the payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope<'a> {
    pub request_code: i32,
    #[serde(flatten)]
    pub metadata: &'a CallMetadata,
    pub biz_seq_no: &'a str,
    pub unique_id: &'a str,
    pub topic: &'a str,
    pub content: &'a str,
    pub ttl: String,
    pub ext_fields: &'a HashMap<String, String>,
}

impl<'a> RequestEnvelope<'a> {
    pub fn new(
        message: &'a EventMeshMessage,
        metadata: &'a CallMetadata,
        code: RequestCode,
        ttl: Duration,
    ) -> Self {
        Self {
            request_code: code.as_i32(),
            metadata,
            biz_seq_no: &message.biz_seq_no,
            unique_id: &message.unique_id,
            topic: &message.topic,
            content: &message.content,
            ttl: ttl.as_millis().to_string(),
            ext_fields: &message.properties,
        }
    }
}

/// Serializes `message` and `metadata` into the outer request body.
///
/// Empty strings are written as `""` and an empty property bag as `{}`.
pub fn encode_request(
    message: &EventMeshMessage,
    metadata: &CallMetadata,
    code: RequestCode,
    ttl: Duration,
) -> Result<Vec<u8>, ProducerError> {
    let envelope = RequestEnvelope::new(message, metadata, code, ttl);
    serde_json::to_vec(&envelope)
        .map_err(|e| ProducerError::invalid_argument(format!("failed to encode message: {}", e)))
}
