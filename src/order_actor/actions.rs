//! Custom actions for the Order actor: the lifecycle transitions.
//!
//! `caller` is the already-authenticated user issuing the request. Each transition is
//! checked and applied inside the actor loop, so it behaves as a conditional update of
//! the single order record.
//!
//! Completion takes three steps because the stake moves through the ledger, outside the
//! actor: `ClaimCompletion` checks the caller and code and marks the order as settling,
//! then the client settles and reports back with `FinishCompletion` or
//! `ReleaseCompletion`.

use crate::model::{Order, UserId};

/// Lifecycle transitions of an [`Order`].
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// NotAccepted → Accepted. The caller becomes the accepter.
    Accept { caller: UserId },
    /// Claims an Accepted order for settlement, gated on the accepter and one-time code.
    ClaimCompletion { caller: UserId, code: String },
    /// Settling → Completed.
    FinishCompletion,
    /// Settling → Accepted again; nothing was paid.
    ReleaseCompletion,
    /// NotAccepted → Cancelled, requester only.
    Cancel { caller: UserId },
}

/// Results from OrderActions - variants match 1:1 with OrderAction, each carrying the
/// order as it stands after the transition.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    Accept(Order),
    ClaimCompletion(Order),
    FinishCompletion(Order),
    ReleaseCompletion(Order),
    Cancel(Order),
}

impl OrderActionResult {
    pub fn into_order(self) -> Order {
        match self {
            OrderActionResult::Accept(order)
            | OrderActionResult::ClaimCompletion(order)
            | OrderActionResult::FinishCompletion(order)
            | OrderActionResult::ReleaseCompletion(order)
            | OrderActionResult::Cancel(order) => order,
        }
    }
}
