//! Error types for the Order actor.

use crate::model::{OrderId, OrderStatus, UserId};
use crate::reward_actor::RewardError;
use crate::user_actor::UserError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The caller is not the party allowed to perform this transition.
    #[error("{caller} may not act on {order_id}")]
    NotYourOrder { order_id: OrderId, caller: UserId },

    /// A requester tried to accept their own order.
    #[error("{0} cannot be accepted by its own requester")]
    SelfAccept(OrderId),

    /// Someone else accepted the order first.
    #[error("{0} has already been accepted")]
    AlreadyAccepted(OrderId),

    /// The transition is not allowed from the order's current status.
    #[error("Cannot {action} {order_id} while it is {status}")]
    WrongState {
        order_id: OrderId,
        status: OrderStatus,
        action: &'static str,
    },

    /// Another completion of the order is moving the stake right now.
    #[error("{0} is already being settled")]
    SettlementInProgress(OrderId),

    /// The one-time code did not match.
    #[error("Invalid one-time code for {0}")]
    InvalidCode(OrderId),

    /// The requester cannot cover the stake.
    #[error("Insufficient funds: balance {balance}, stake {stake}")]
    InsufficientFunds { balance: i64, stake: i64 },

    /// Every generated display code was already taken.
    #[error("No free display code after {attempts} attempts")]
    IdGenerationFailed { attempts: u32 },

    /// The order completed but the stake did not fully move: either the accepter was
    /// not credited after the debit, or the debit's outcome is unknown because it timed
    /// out. The order is never settled a second time.
    #[error("{order_id} completed but {amount} coins from {from} to {to} are unsettled")]
    Inconsistent {
        order_id: OrderId,
        from: UserId,
        to: UserId,
        amount: i64,
    },

    /// Orders are kept for history and cannot be deleted.
    #[error("Order {0} cannot be deleted")]
    Retained(String),

    /// The requester could not be looked up.
    #[error("Requester lookup failed: {0}")]
    Requester(#[from] UserError),

    /// The reward ledger refused or failed.
    #[error("Ledger error: {0}")]
    Ledger(#[from] RewardError),

    /// The order registry did not answer within the call deadline.
    #[error("Order registry timed out after {0:?}")]
    Timeout(Duration),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
