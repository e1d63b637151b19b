//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the exchange's actors.
//!
//! ## Wiring
//!
//! No actor waits on another. Each runs with a `()` context; the one cross-store
//! workflow, ordering, lives in the client:
//!
//! ```rust,ignore
//! impl ActorEntity for User { type Context = (); }
//! impl ActorEntity for RewardAccount { type Context = (); }
//! impl ActorEntity for Order { type Context = (); }
//!
//! // The balance gate, requester snapshot and settlement run here
//! let (order_actor, order_client) = order_actor::new(&config, user_client, reward_client);
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors log final state** and return
//! 4. **Await completion** - Order first, since order clients hold the other clients
//!
//! The dependency graph (order client → User, order client → Reward) is acyclic, so
//! channel closure is enough to stop everything.
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging; see the [`tracing`] module.

pub mod exchange_system;
pub mod tracing;

pub use self::exchange_system::*;
pub use self::tracing::*;
