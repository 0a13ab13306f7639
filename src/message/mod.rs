//! The `message` module defines the event handed to the producer.

pub mod eventmesh_message;

pub use eventmesh_message::EventMeshMessage;
