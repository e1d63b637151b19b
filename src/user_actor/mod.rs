//! # User Actor
//!
//! The identity store: registration, profile edits, and lookups by id or email.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use errand_exchange::config::ExchangeConfig;
//! use errand_exchange::model::UserCreate;
//! use errand_exchange::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(&ExchangeConfig::default());
//!
//!     // No dependencies, so context is ()
//!     tokio::spawn(actor.run(()));
//!
//!     let user = client
//!         .create_user(UserCreate::new("asha@campus.edu", "Asha", "555-0101"))
//!         .await?;
//!     assert_eq!(client.lookup(user.id).await?.name, "Asha");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::config::ExchangeConfig;
use crate::framework::ResourceActor;
use crate::model::User;

/// Creates a new User actor and its client.
pub fn new(config: &ExchangeConfig) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(config.mailbox_capacity);
    let client = UserClient::new(generic_client.with_deadline(config.call_timeout()));

    (actor, client)
}
