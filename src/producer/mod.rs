//! The `producer` module exposes the EventMesh HTTP producer.
//!
//! [`EventMeshHttpProducer`] is built once from an immutable
//! [`ProducerConfig`] and shared across tasks; it offers fire-and-forget
//! publishing and blocking request/reply.

pub mod config;
pub mod http_producer;
pub mod selector;

pub use config::ProducerConfig;
pub use http_producer::EventMeshHttpProducer;
pub use selector::AddressSelector;
