//! Error types for the Reward actor.

use crate::model::UserId;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RewardError {
    /// No account exists for the user.
    #[error("Reward account not found: {0}")]
    NotFound(String),

    /// The user already has an account.
    #[error("Reward account already exists: {0}")]
    AlreadyExists(String),

    /// Accounts are never removed.
    #[error("Reward account {0} cannot be deleted")]
    Retained(String),

    /// The adjustment would overflow the balance.
    #[error("Adjusting {user_id} by {delta} overflows its balance")]
    Overflow { user_id: UserId, delta: i64 },

    /// A transfer debited `from` but could not credit `to`. Needs reconciliation.
    #[error("Transfer of {amount} from {from} to {to} debited but not credited")]
    Inconsistent { from: UserId, to: UserId, amount: i64 },

    /// The ledger did not answer within the call deadline.
    #[error("Reward ledger timed out after {0:?}")]
    Timeout(Duration),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
