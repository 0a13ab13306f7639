use std::time::Duration;

use crate::config::Settings;
use crate::producer::selector::parse_addresses;
use crate::protocol::CallMetadata;
use crate::protocol::request::{LANGUAGE, PROTOCOL_VERSION};
use crate::utils::ProducerError;

/// Resolved, immutable configuration of one producer.
///
/// Each producer owns its own value, so independently configured producers
/// can be built concurrently without any shared defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerConfig {
    /// Broker base URLs, e.g. `http://127.0.0.1:10105`.
    pub addresses: Vec<String>,
    /// Deadline applied to `publish`.
    pub timeout: Duration,
    /// TTL sent with published messages that carry no `ttl` property.
    pub default_ttl: Duration,
    pub metadata: CallMetadata,
}

impl ProducerConfig {
    /// Configuration for `lite_eventmesh_addr` with every other value taken
    /// from [`Settings::default`].
    pub fn new(lite_eventmesh_addr: &str) -> Result<Self, ProducerError> {
        let mut settings = Settings::default();
        settings.producer.lite_eventmesh_addr = lite_eventmesh_addr.to_string();
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ProducerError> {
        let producer = &settings.producer;
        let identity = &settings.identity;

        if producer.timeout_ms == 0 {
            return Err(ProducerError::invalid_argument("timeout_ms must be positive"));
        }

        let client_id = identity
            .client_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("{}-{}", identity.ip, identity.pid));

        Ok(Self {
            addresses: parse_addresses(&producer.lite_eventmesh_addr)?,
            timeout: Duration::from_millis(producer.timeout_ms),
            default_ttl: Duration::from_millis(producer.default_ttl_ms),
            metadata: CallMetadata {
                client_id,
                language: LANGUAGE.to_string(),
                version: PROTOCOL_VERSION.to_string(),
                env: identity.env.clone(),
                idc: identity.idc.clone(),
                ip: identity.ip.clone(),
                pid: identity.pid.clone(),
                sys: identity.sys.clone(),
                username: identity.username.clone(),
                passwd: identity.password.clone(),
                producer_group: producer.producer_group.clone(),
            },
        })
    }

    /// A zero timeout is accepted here but every call then fails with
    /// `InvalidArgument`, matching `request` with a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}
