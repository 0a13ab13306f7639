//! # EventMesh HTTP producer
//!
//! `eventmesh_producer` is a client-side producer for the EventMesh HTTP
//! protocol. It publishes events and performs request/reply exchanges with a
//! broker over plain HTTP, bounded by a caller-supplied timeout.
//!
//! ## Core Modules
//!
//! - `message`: The event handed to and returned by the producer.
//! - `protocol`: Request envelope encoding and the two-pass response decoding.
//! - `transport`: The `Transport` seam and its `reqwest` implementation.
//! - `producer`: The producer client, its resolved configuration and broker selection.
//! - `config`: Loading settings from files and environment variables.
//! - `utils`: Error taxonomy and logging bootstrap.
//!
//! ```no_run
//! use std::time::Duration;
//! use eventmesh_producer::message::EventMeshMessage;
//! use eventmesh_producer::producer::{EventMeshHttpProducer, ProducerConfig};
//!
//! # async fn run() -> Result<(), eventmesh_producer::utils::ProducerError> {
//! let producer = EventMeshHttpProducer::new(ProducerConfig::new("127.0.0.1:10105")?);
//! let message = EventMeshMessage::new("test-topic", "{\"data\":1}");
//! producer.publish(&message).await?;
//! let reply = producer.request(&message, Duration::from_secs(3)).await?;
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod message;
pub mod producer;
pub mod protocol;
pub mod transport;
pub mod utils;
