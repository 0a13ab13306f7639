//! The `protocol` module is the envelope codec of the EventMesh HTTP protocol.
//!
//! Requests are a single JSON object carrying the message and the caller's
//! metadata. Responses are decoded in two typed passes: the outer envelope
//! (`retCode` / `retMsg`) first, then, for request/reply only, the reply
//! payload that the broker serializes as JSON text inside `retMsg`. Keeping
//! the passes separate is what lets `MalformedEnvelope` and
//! `MalformedPayload` stay distinguishable.

pub mod request;
pub mod response;

pub use request::{CallMetadata, RequestCode, RequestEnvelope, encode_request};
pub use response::{DecodeError, ReplyPayload, ResponseEnvelope, decode_inner, decode_outer};

#[cfg(test)]
mod tests;
