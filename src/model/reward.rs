use crate::model::UserId;
use serde::{Deserialize, Serialize};

/// A user's reward-coin balance.
///
/// Stored under the owner's [`UserId`]; the balance only ever moves through
/// [`RewardAction::Adjust`](crate::reward_actor::RewardAction::Adjust).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardAccount {
    pub user_id: UserId,
    pub coins: i64,
}

/// Payload for opening an account.
#[derive(Debug, Clone)]
pub struct RewardCreate {
    pub user_id: UserId,
    pub opening_balance: i64,
}

#[derive(Debug, Clone, Copy)]
pub enum RewardQuery {
    All,
}

/// Outcome of a completed two-step transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub from: UserId,
    pub to: UserId,
    pub amount: i64,
    pub from_balance: i64,
    pub to_balance: i64,
}
