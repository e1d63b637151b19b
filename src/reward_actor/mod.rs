//! # Reward Actor
//!
//! The coin ledger. One [`RewardAccount`] per user, stored under the user's id, changed
//! only through the [`RewardAction::Adjust`] action.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`RewardAccount`]
//! - [`error`] - [`RewardError`] type for type-safe error handling
//! - [`actions`] - [`RewardAction`] and [`RewardActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! let coins = reward_client.balance(user_id).await?;
//! let after = reward_client.adjust(user_id, -10).await?;
//!
//! // Debit then credit, as two independent atomic adjustments
//! let receipt = reward_client.transfer(from, to, 10).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::RewardClient;
use crate::config::ExchangeConfig;
use crate::framework::ResourceActor;
use crate::model::RewardAccount;

/// Creates a new Reward actor and its client.
pub fn new(config: &ExchangeConfig) -> (ResourceActor<RewardAccount>, RewardClient) {
    let (actor, generic_client) = ResourceActor::new(config.mailbox_capacity);
    let client = RewardClient::new(
        generic_client.with_deadline(config.call_timeout()),
        config.signup_bonus,
    );

    (actor, client)
}
