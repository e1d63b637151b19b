//! # Errand Exchange
//!
//! > **A campus errand exchange on resource-oriented actors.**
//!
//! One student posts an errand ("pick up two samosas from the canteen"), another accepts
//! it, delivers, and closes it with the one-time code the requester hands over. Closing
//! the order moves the stake, 10 coins by default, from requester to accepter.
//!
//! ## Core Concepts
//!
//! ### One actor per store
//! Users, reward accounts and orders each live in a [`ResourceActor`](framework::ResourceActor)
//! that applies requests one at a time. There are no locks: an order transition is checked
//! and applied inside the actor that owns the order, so two people racing to accept the
//! same errand cannot both win.
//!
//! ### Order lifecycle
//!
//! ```text
//! NotAccepted ──accept (anyone but the requester)──▶ Accepted ──complete (accepter + code)──▶ Completed
//!      │
//!      └──cancel (requester)──▶ Cancelled
//! ```
//!
//! Posting requires a balance of at least the stake; nothing is held back at that point.
//! On completion the stake is debited from the requester and credited to the accepter as
//! two separate ledger adjustments (see [`RewardClient::transfer`](clients::RewardClient::transfer)).
//! The order is claimed while the coins move, so it is never paid twice, and the Order
//! actor keeps serving other orders meanwhile.
//!
//! ### Type-Safe Error Handling
//! Each actor defines its own error type (`UserError`, `RewardError`, `OrderError`). The
//! framework boxes it on the way out of the actor and each client downcasts it back, so
//! callers match on domain variants such as `OrderError::InvalidCode`.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic actor, client, messages and mocks
//! - [`model`]: the records ([`User`](model::User), [`RewardAccount`](model::RewardAccount), [`Order`](model::Order))
//! - [`user_actor`], [`reward_actor`], [`order_actor`]: the entity implementations
//! - [`clients`]: typed wrappers, plus the [`OrderRegistry`](clients::OrderRegistry) entry point
//! - [`codes`]: display codes and one-time codes
//! - [`config`]: amounts, code format and actor plumbing, overridable from the environment
//! - [`lifecycle`]: [`ExchangeSystem`](lifecycle::ExchangeSystem) startup, signup, shutdown and tracing
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod codes;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod reward_actor;
pub mod user_actor;
