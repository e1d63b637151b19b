//! # Order Actor
//!
//! The order registry: owns every order record and enforces the lifecycle.
//!
//! ## Dependencies
//!
//! The actor itself runs with a `()` context and answers every request from its own
//! store. The work that touches the other actors lives in
//! [`OrderClient`](crate::clients::OrderClient), on the caller's task:
//! - the Reward actor, to check the requester can cover the stake and to settle on completion;
//! - the User actor, to snapshot the requester's name and phone at creation.
//!
//! A slow ledger therefore delays only the completion waiting on it, never the other
//! orders.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{OrderClient, RewardClient, UserClient};
use crate::config::ExchangeConfig;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
///
/// The client keeps `users` and `rewards` for the balance gate, the requester snapshot
/// and settlement.
pub fn new(
    config: &ExchangeConfig,
    users: UserClient,
    rewards: RewardClient,
) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(config.mailbox_capacity);
    let client = OrderClient::new(
        generic_client.with_deadline(config.call_timeout()),
        users,
        rewards,
        config,
    );

    (actor, client)
}
