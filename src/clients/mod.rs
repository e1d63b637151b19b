//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod order_client;
pub mod reward_client;
pub mod user_client;

pub use order_client::*;
pub use reward_client::*;
pub use user_client::*;
