//! The `config` module loads producer settings from an optional file and
//! the environment. It only produces values; the producer itself is built
//! from an explicit [`ProducerConfig`](crate::producer::ProducerConfig).

mod settings;

use config::{Config, ConfigError, Environment, File};

pub use settings::{
    IdentitySettings, LoggingSettings, PartialIdentitySettings, PartialLoggingSettings,
    PartialProducerSettings, PartialSettings, ProducerSettings, Settings,
};

pub const DEFAULT_CONFIG_FILE: &str = "config/default";
pub const ENV_PREFIX: &str = "EVENTMESH";

/// Loads the configuration from `config/default.*` and `EVENTMESH__*`
/// environment variables, merged over the default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_CONFIG_FILE)
}

/// Same as [`load_config`] with an explicit (optional) settings file.
///
/// Environment variables use `__` between sections, e.g.
/// `EVENTMESH__PRODUCER__TIMEOUT_MS=3000`.
pub fn load_config_from(file: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(Settings::merge(partial))
}
