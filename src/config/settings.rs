use serde::Deserialize;

/// Top-level configuration settings for the producer.
///
/// Includes the broker connection, the client identity sent with every call
/// and the logging level.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub producer: ProducerSettings,
    pub identity: IdentitySettings,
    pub logging: LoggingSettings,
}

/// Broker connection settings.
///
/// `lite_eventmesh_addr` is a `;`-separated list of `host:port` entries.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProducerSettings {
    pub lite_eventmesh_addr: String,
    pub timeout_ms: u64,
    pub default_ttl_ms: u64,
    pub producer_group: String,
}

/// Identity of this client as reported to the broker.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    pub env: String,
    pub idc: String,
    pub ip: String,
    pub pid: String,
    pub sys: String,
    pub username: String,
    pub password: String,
    /// Derived from `ip` and `pid` when not set.
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub producer: Option<PartialProducerSettings>,
    pub identity: Option<PartialIdentitySettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialProducerSettings {
    pub lite_eventmesh_addr: Option<String>,
    pub timeout_ms: Option<u64>,
    pub default_ttl_ms: Option<u64>,
    pub producer_group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialIdentitySettings {
    pub env: Option<String>,
    pub idc: Option<String>,
    pub ip: Option<String>,
    pub pid: Option<String>,
    pub sys: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            producer: ProducerSettings {
                lite_eventmesh_addr: "127.0.0.1:10105".to_string(),
                timeout_ms: 5_000,
                default_ttl_ms: 14_400_000,
                producer_group: "EventMeshTest-producerGroup".to_string(),
            },
            identity: IdentitySettings {
                env: "env".to_string(),
                idc: "idc".to_string(),
                ip: "127.0.0.1".to_string(),
                pid: std::process::id().to_string(),
                sys: "1234".to_string(),
                username: "eventmesh".to_string(),
                password: "pass".to_string(),
                client_id: None,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Fills every value missing from `partial` with its default.
    pub fn merge(partial: PartialSettings) -> Self {
        let default = Settings::default();
        let producer = partial.producer.as_ref();
        let identity = partial.identity.as_ref();
        let logging = partial.logging.as_ref();

        Settings {
            producer: ProducerSettings {
                lite_eventmesh_addr: producer
                    .and_then(|p| p.lite_eventmesh_addr.clone())
                    .unwrap_or(default.producer.lite_eventmesh_addr),
                timeout_ms: producer
                    .and_then(|p| p.timeout_ms)
                    .unwrap_or(default.producer.timeout_ms),
                default_ttl_ms: producer
                    .and_then(|p| p.default_ttl_ms)
                    .unwrap_or(default.producer.default_ttl_ms),
                producer_group: producer
                    .and_then(|p| p.producer_group.clone())
                    .unwrap_or(default.producer.producer_group),
            },
            identity: IdentitySettings {
                env: identity
                    .and_then(|i| i.env.clone())
                    .unwrap_or(default.identity.env),
                idc: identity
                    .and_then(|i| i.idc.clone())
                    .unwrap_or(default.identity.idc),
                ip: identity
                    .and_then(|i| i.ip.clone())
                    .unwrap_or(default.identity.ip),
                pid: identity
                    .and_then(|i| i.pid.clone())
                    .unwrap_or(default.identity.pid),
                sys: identity
                    .and_then(|i| i.sys.clone())
                    .unwrap_or(default.identity.sys),
                username: identity
                    .and_then(|i| i.username.clone())
                    .unwrap_or(default.identity.username),
                password: identity
                    .and_then(|i| i.password.clone())
                    .unwrap_or(default.identity.password),
                client_id: identity
                    .and_then(|i| i.client_id.clone())
                    .or(default.identity.client_id),
            },
            logging: LoggingSettings {
                level: logging
                    .and_then(|l| l.level.clone())
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
