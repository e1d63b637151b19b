//! Custom actions for the Reward actor.
//!
//! Reads and atomic adjustments of a single [`RewardAccount`](crate::model::RewardAccount).
//! Each one runs inside the actor loop, so concurrent adjustments to one account never
//! lose an update.

/// Ledger operations on a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardAction {
    /// Reads the current balance without modifying it.
    Balance,
    /// Adds the delta (negative to debit) to the balance.
    ///
    /// Non-negativity is not enforced here; callers that need it check first.
    Adjust(i64),
}

/// Results from RewardActions - variants match 1:1 with RewardAction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardActionResult {
    /// Current balance.
    Balance(i64),
    /// Balance after the adjustment.
    Adjust(i64),
}
