use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::ProducerError;

/// Property key that overrides the configured time-to-live (milliseconds).
pub const TTL_PROPERTY: &str = "ttl";

/// A single event published to, or received from, an EventMesh broker.
///
/// The producer only borrows a message for the duration of a call, so a
/// message is never mutated while it is in flight.
///
/// # Fields
///
/// - `biz_seq_no` - Caller-assigned business sequence number.
/// - `unique_id` - Idempotency / deduplication key.
/// - `topic` - Destination channel, required for every call.
/// - `content` - Opaque payload, usually JSON text.
/// - `properties` - Unordered string properties; empty means absent.
///
/// # Example
///
/// ```rust
/// use eventmesh_producer::message::EventMeshMessage;
///
/// let msg = EventMeshMessage::new("test-topic", "{\"temp\":25}")
///     .with_biz_seq_no("30000000000000000001")
///     .with_property("hello", "EventMesh");
/// assert_eq!(msg.properties["hello"], "EventMesh");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeshMessage {
    pub biz_seq_no: String,
    pub unique_id: String,
    pub topic: String,
    pub content: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl EventMeshMessage {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_biz_seq_no(mut self, biz_seq_no: impl Into<String>) -> Self {
        self.biz_seq_no = biz_seq_no.into();
        self
    }

    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = unique_id.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Checks that the message can be handed to the broker.
    pub fn validate(&self) -> Result<(), ProducerError> {
        if self.topic.trim().is_empty() {
            return Err(ProducerError::invalid_argument("message topic is empty"));
        }
        Ok(())
    }

    /// TTL in milliseconds requested through the `ttl` property, if it parses.
    pub fn ttl_millis(&self) -> Option<u64> {
        self.properties
            .get(TTL_PROPERTY)
            .and_then(|ttl| ttl.trim().parse().ok())
    }
}
