use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, warn};

use crate::message::EventMeshMessage;
use crate::producer::config::ProducerConfig;
use crate::producer::selector::AddressSelector;
use crate::protocol::{RequestCode, ResponseEnvelope, decode_inner, decode_outer, encode_request};
use crate::transport::{
    HttpTransport, Transport, TransportError, TransportRequest, UnexpectedStatus,
};
use crate::utils::ProducerError;

/// Header carrying the request code next to the JSON body.
pub const CODE_HEADER: &str = "code";

/// Producer for the EventMesh HTTP protocol.
///
/// Calls never mutate the configuration, so one producer can be wrapped in
/// an `Arc` and used from many tasks at once. Nothing is retried here; every
/// failure comes back as a classified [`ProducerError`].
pub struct EventMeshHttpProducer {
    config: ProducerConfig,
    selector: AddressSelector,
    transport: Arc<dyn Transport>,
}

impl EventMeshHttpProducer {
    /// Creates a producer talking HTTP through `reqwest`.
    pub fn new(config: ProducerConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(config: ProducerConfig, transport: Arc<dyn Transport>) -> Self {
        let selector = AddressSelector::new(config.addresses.clone());
        Self {
            config,
            selector,
            transport,
        }
    }

    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    /// Publishes `message` and returns once the broker has accepted it.
    ///
    /// Acceptance does not mean downstream delivery. The configured timeout
    /// bounds the call; the TTL comes from the `ttl` property when present.
    pub async fn publish(&self, message: &EventMeshMessage) -> Result<(), ProducerError> {
        let ttl = message
            .ttl_millis()
            .map(Duration::from_millis)
            .unwrap_or(self.config.default_ttl);

        self.call(message, RequestCode::MsgSendAsync, ttl, self.config.timeout)
            .await?;
        Ok(())
    }

    /// Sends `message` and waits up to `timeout` for the reply.
    ///
    /// The returned message carries the reply's topic, body (as `content`)
    /// and properties. Its `biz_seq_no` / `unique_id` are only set when the
    /// reply itself supplies them; they are never copied from the request.
    pub async fn request(
        &self,
        message: &EventMeshMessage,
        timeout: Duration,
    ) -> Result<EventMeshMessage, ProducerError> {
        let envelope = self
            .call(message, RequestCode::MsgSendSync, timeout, timeout)
            .await?;

        let reply = decode_inner(envelope.message())?;
        debug!(topic = %reply.topic, "decoded reply payload");
        Ok(reply.into_message())
    }

    async fn call(
        &self,
        message: &EventMeshMessage,
        code: RequestCode,
        ttl: Duration,
        timeout: Duration,
    ) -> Result<ResponseEnvelope, ProducerError> {
        if timeout.is_zero() {
            return Err(ProducerError::invalid_argument("timeout must be positive"));
        }
        message.validate()?;

        let body = encode_request(message, &self.config.metadata, code, ttl)?;
        let url = self
            .selector
            .pick()
            .ok_or_else(|| ProducerError::invalid_argument("no EventMesh address configured"))?
            .to_string();

        debug!(
            url = %url,
            code = %code,
            topic = %message.topic,
            biz_seq_no = %message.biz_seq_no,
            "sending EventMesh request"
        );

        let request = TransportRequest {
            url,
            headers: vec![(CODE_HEADER.to_string(), code.to_string())],
            body,
        };

        let response = match time::timeout(timeout, self.transport.send(request, timeout)).await {
            Ok(Ok(response)) => response,
            Ok(Err(TransportError::Connection(cause))) => {
                warn!(topic = %message.topic, error = %cause, "EventMesh transport failure");
                return Err(ProducerError::Transport(cause));
            }
            Ok(Err(TransportError::Timeout)) | Err(_) => {
                warn!(topic = %message.topic, ?timeout, "EventMesh request timed out");
                return Err(ProducerError::Timeout(timeout));
            }
        };

        if !response.is_success() {
            let status = UnexpectedStatus::from_response(&response);
            warn!(topic = %message.topic, status = status.status, "EventMesh returned non-2xx status");
            return Err(ProducerError::transport(status));
        }

        let envelope = decode_outer(&response.body)?;
        if !envelope.is_success() {
            warn!(
                topic = %message.topic,
                ret_code = envelope.ret_code,
                ret_msg = %envelope.message(),
                "EventMesh rejected request"
            );
            return Err(ProducerError::BrokerRejected {
                code: envelope.ret_code,
                message: envelope.message().to_string(),
            });
        }

        Ok(envelope)
    }
}
