//! Entity trait implementation for the RewardAccount domain type.
//!
//! Accounts use the owner's [`UserId`] as their key ([`ActorEntity::natural_id`]), so the
//! actor itself refuses a second account for the same user.

use super::actions::{RewardAction, RewardActionResult};
use crate::framework::{ActorEntity, NoUpdate};
use crate::model::{RewardAccount, RewardCreate, RewardQuery, UserId};
use crate::reward_actor::RewardError;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for RewardAccount {
    type Id = UserId;
    type Create = RewardCreate;
    type Update = NoUpdate;
    type Action = RewardAction;
    type ActionResult = RewardActionResult;
    type Query = RewardQuery;
    type Context = ();
    type Error = RewardError;

    fn from_create_params(id: UserId, params: RewardCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: id,
            coins: params.opening_balance,
        })
    }

    fn id(&self) -> &UserId {
        &self.user_id
    }

    fn natural_id(params: &RewardCreate) -> Option<UserId> {
        Some(params.user_id)
    }

    fn matches(&self, query: &RewardQuery) -> bool {
        match query {
            RewardQuery::All => true,
        }
    }

    async fn on_update(&mut self, update: NoUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(RewardError::Retained(self.user_id.to_string()))
    }

    /// Handles ledger actions.
    ///
    /// # Actions
    /// - `Balance`: Returns the current coins
    /// - `Adjust`: Adds the delta and returns the new balance; fails only on overflow
    async fn handle_action(
        &mut self,
        action: RewardAction,
        _ctx: &(),
    ) -> Result<RewardActionResult, Self::Error> {
        match action {
            RewardAction::Balance => Ok(RewardActionResult::Balance(self.coins)),
            RewardAction::Adjust(delta) => {
                self.coins = self.coins.checked_add(delta).ok_or(RewardError::Overflow {
                    user_id: self.user_id,
                    delta,
                })?;
                Ok(RewardActionResult::Adjust(self.coins))
            }
        }
    }
}
