//! The `error` module defines the error taxonomy surfaced by the producer.
//!
//! Every failure of a publish or request/reply call maps to exactly one
//! [`ProducerError`] variant so callers can build their own retry policy on
//! the category (retry `Timeout`/`Transport`, never `InvalidArgument`).

use std::error::Error;
use std::time::Duration;

/// Boxed cause carried by transport failures.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Classified failure of a single producer call.
#[derive(Debug, thiserror::Error)]
pub enum ProducerError {
    /// The caller supplied an unusable message or configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network failure, connection refusal or a non-2xx HTTP status.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The local deadline elapsed before a response was obtained.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The outer response body was not a JSON object with an integer `retCode`.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The broker answered with a non-zero `retCode`.
    #[error("broker rejected request (retCode {code}): {message}")]
    BrokerRejected { code: i64, message: String },

    /// The nested reply payload could not be decoded (request/reply only).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl ProducerError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn transport(cause: impl Into<BoxError>) -> Self {
        Self::Transport(cause.into())
    }

    /// Whether the failure is transient and may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }
}
