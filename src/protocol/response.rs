use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::message::EventMeshMessage;
use crate::utils::ProducerError;

/// Failure of one of the two response decode passes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<DecodeError> for ProducerError {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::MalformedEnvelope(message) => Self::MalformedEnvelope(message),
            DecodeError::MalformedPayload(message) => Self::MalformedPayload(message),
        }
    }
}

/// Outer response body: `{"retCode": <int>, "retMsg": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "retCode", alias = "returnCode")]
    pub ret_code: i64,

    #[serde(
        rename = "retMsg",
        alias = "returnMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ret_msg: Option<String>,

    #[serde(rename = "resTime", default, skip_serializing_if = "Option::is_none")]
    pub res_time: Option<i64>,
}

impl ResponseEnvelope {
    pub fn new(ret_code: i64, ret_msg: impl Into<String>) -> Self {
        Self {
            ret_code,
            ret_msg: Some(ret_msg.into()),
            res_time: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.ret_code == 0
    }

    /// `retMsg`, or an empty string when the broker omitted it.
    pub fn message(&self) -> &str {
        self.ret_msg.as_deref().unwrap_or_default()
    }

    /// Serializes the envelope the way a broker writes it.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Reply carried as JSON text inside `retMsg` of a successful request/reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,

    pub body: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: HashMap<String, String>,

    #[serde(
        rename = "bizSeqNo",
        alias = "bizseqno",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub biz_seq_no: Option<String>,

    #[serde(
        rename = "uniqueId",
        alias = "uniqueid",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_id: Option<String>,
}

impl ReplyPayload {
    /// Builds the reply message. Ids are only set when the broker sent them;
    /// nothing is carried over from the request.
    pub fn into_message(self) -> EventMeshMessage {
        EventMeshMessage {
            biz_seq_no: self.biz_seq_no.unwrap_or_default(),
            unique_id: self.unique_id.unwrap_or_default(),
            topic: self.topic,
            content: self.body,
            properties: self.properties,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes `parsed` only when it is a JSON object. Derived struct
/// deserializers also accept arrays (fields by position), which neither
/// envelope allows.
fn from_object<T: DeserializeOwned>(parsed: serde_json::Result<Value>) -> Result<T, String> {
    match parsed.map_err(|e| e.to_string())? {
        object @ Value::Object(_) => serde_json::from_value(object).map_err(|e| e.to_string()),
        other => Err(format!("expected a JSON object, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First decode pass: the outer envelope.
pub fn decode_outer(bytes: &[u8]) -> Result<ResponseEnvelope, DecodeError> {
    from_object(serde_json::from_slice(bytes)).map_err(DecodeError::MalformedEnvelope)
}

/// Second decode pass: the reply payload serialized inside `retMsg`.
pub fn decode_inner(ret_msg: &str) -> Result<ReplyPayload, DecodeError> {
    from_object(serde_json::from_str(ret_msg)).map_err(DecodeError::MalformedPayload)
}
