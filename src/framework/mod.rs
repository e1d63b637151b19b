//! Generic actor framework for resource management.
//!
//! Every store in the exchange (users, reward accounts, orders) is a [`ResourceActor`]: one
//! Tokio task owning a `HashMap` of records and applying requests to it strictly one at a
//! time. Callers hold a cheap, cloneable [`ResourceClient`] and talk to the task over a
//! bounded mailbox with a oneshot reply per request.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that manages entities
//! - [`ResourceClient`] - Type-safe handle for sending requests
//! - [`ActorClient`] - Shared `get`/`list` for typed client wrappers
//! - [`FrameworkError`] - Transport and store errors, wrapping entity errors
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test code that depends on a client without
//! spawning its actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, NoUpdate};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
