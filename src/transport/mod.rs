//! The `transport` module is responsible for moving request bytes to the
//! broker and bringing the response back within a deadline.
//!
//! The producer only depends on the [`Transport`] trait; [`HttpTransport`] is
//! the default implementation on top of `reqwest`.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::utils::error::BoxError;

pub use http::HttpTransport;

/// A fully encoded POST.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Raw HTTP answer; status classification is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport's own deadline fired.
    #[error("deadline exceeded")]
    Timeout,
    /// Connection refused, reset, DNS failure, body read failure, ...
    #[error("{0}")]
    Connection(#[source] BoxError),
}

/// A response that arrived but carried a non-2xx HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected HTTP status {status}{}", body_suffix(.body))]
pub struct UnexpectedStatus {
    pub status: u16,
    pub body: String,
}

impl UnexpectedStatus {
    pub fn from_response(response: &TransportResponse) -> Self {
        Self {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }
    }
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

/// Sends one request and waits for its response, giving up after `timeout`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: TransportRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}
