use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use super::{Transport, TransportError, TransportRequest, TransportResponse};

pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

/// `reqwest`-backed transport. One client (and its connection pool) is
/// shared by every call made through this transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn headers(request: &TransportRequest) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Connection(e.into()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| TransportError::Connection(e.into()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(error.into())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: TransportRequest,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let headers = Self::headers(&request)?;
        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .timeout(timeout)
            .body(request.body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
