//! Pure data structures (DTOs) implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod order;
pub mod reward;
pub mod user;

pub use order::*;
pub use reward::*;
pub use user::*;
