//! The `utils` module provides shared definitions used across the producer:
//! the classified error type returned by every producer call and the
//! logging bootstrap used by the CLI and tests.

pub mod error;
pub mod logging;

pub use error::ProducerError;
