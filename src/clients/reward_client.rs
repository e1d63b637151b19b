//! # Reward Client
//!
//! Provides a high-level API for interacting with the `Reward` actor: account opening,
//! balance reads, atomic adjustments, and the two-step `transfer`.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{RewardAccount, RewardCreate, RewardQuery, TransferReceipt, UserId};
use crate::reward_actor::{RewardAction, RewardActionResult, RewardError};
use async_trait::async_trait;
use tracing::{debug, error, instrument};

/// Client for interacting with the Reward actor.
#[derive(Clone)]
pub struct RewardClient {
    inner: ResourceClient<RewardAccount>,
    signup_bonus: i64,
}

impl RewardClient {
    pub fn new(inner: ResourceClient<RewardAccount>, signup_bonus: i64) -> Self {
        Self {
            inner,
            signup_bonus,
        }
    }
}

#[async_trait]
impl ActorClient<RewardAccount> for RewardClient {
    type Error = RewardError;

    fn inner(&self) -> &ResourceClient<RewardAccount> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<RewardError>() {
            Ok(err) => err,
            Err(FrameworkError::AlreadyExists(id)) => RewardError::AlreadyExists(id),
            Err(FrameworkError::NotFound(id)) => RewardError::NotFound(id),
            Err(FrameworkError::Timeout(limit)) => RewardError::Timeout(limit),
            Err(other) => RewardError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl RewardClient {
    /// Opens the user's account with the signup bonus. Fails with
    /// [`RewardError::AlreadyExists`] if the user already has one.
    #[instrument(skip(self))]
    pub async fn create_account(&self, user_id: UserId) -> Result<RewardAccount, RewardError> {
        debug!(opening_balance = self.signup_bonus, "Sending request");
        self.inner
            .create(RewardCreate {
                user_id,
                opening_balance: self.signup_bonus,
            })
            .await
            .map_err(Self::map_error)
    }

    /// Current coins of the user's account.
    #[instrument(skip(self))]
    pub async fn balance(&self, user_id: UserId) -> Result<i64, RewardError> {
        match self
            .inner
            .perform_action(user_id, RewardAction::Balance)
            .await
            .map_err(Self::map_error)?
        {
            RewardActionResult::Balance(coins) => Ok(coins),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `delta` to the user's balance and returns the new balance.
    #[instrument(skip(self))]
    pub async fn adjust(&self, user_id: UserId, delta: i64) -> Result<i64, RewardError> {
        match self
            .inner
            .perform_action(user_id, RewardAction::Adjust(delta))
            .await
            .map_err(Self::map_error)?
        {
            RewardActionResult::Adjust(coins) => Ok(coins),
            other => Err(unexpected(other)),
        }
    }

    /// Moves `amount` coins from one account to another: debit `from`, then credit `to`.
    ///
    /// The two adjustments are independent. If the debit is refused nothing has moved and
    /// its error is returned as is. A debit that hits the call deadline comes back as
    /// [`RewardError::Timeout`] but may still be applied later, so its outcome is unknown.
    /// If the credit fails after a successful debit the ledger is out of balance; that is
    /// reported as [`RewardError::Inconsistent`] and never retried here.
    #[instrument(skip(self))]
    pub async fn transfer(
        &self,
        from: UserId,
        to: UserId,
        amount: i64,
    ) -> Result<TransferReceipt, RewardError> {
        let from_balance = self.adjust(from, -amount).await?;
        let to_balance = match self.adjust(to, amount).await {
            Ok(coins) => coins,
            Err(e) => {
                error!(%from, %to, amount, error = %e, "Credit failed after debit");
                return Err(RewardError::Inconsistent { from, to, amount });
            }
        };
        debug!(from_balance, to_balance, "Transfer settled");
        Ok(TransferReceipt {
            from,
            to,
            amount,
            from_balance,
            to_balance,
        })
    }

    /// Sum of every balance in the ledger.
    #[instrument(skip(self))]
    pub async fn total_supply(&self) -> Result<i64, RewardError> {
        let accounts = self.list(RewardQuery::All).await?;
        Ok(accounts.iter().map(|account| account.coins).sum())
    }
}

fn unexpected(result: RewardActionResult) -> RewardError {
    RewardError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::framework::ResourceActor;

    fn spawn() -> RewardClient {
        let (actor, client) = ResourceActor::<RewardAccount>::new(10);
        tokio::spawn(actor.run(()));
        RewardClient::new(client, 50)
    }

    #[tokio::test]
    async fn test_account_opens_with_bonus_once() {
        let rewards = spawn();
        let account = rewards.create_account(UserId(1)).await.unwrap();
        assert_eq!(account.coins, 50);
        assert_eq!(rewards.balance(UserId(1)).await.unwrap(), 50);

        let err = rewards.create_account(UserId(1)).await.unwrap_err();
        assert_eq!(err, RewardError::AlreadyExists("user_1".into()));
        assert_eq!(rewards.balance(UserId(1)).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_missing_account() {
        let rewards = spawn();
        assert_eq!(
            rewards.balance(UserId(5)).await.unwrap_err(),
            RewardError::NotFound("user_5".into())
        );
        assert_eq!(
            rewards.adjust(UserId(5), 1).await.unwrap_err(),
            RewardError::NotFound("user_5".into())
        );
    }

    #[tokio::test]
    async fn test_transfer_conserves_supply() {
        let rewards = spawn();
        rewards.create_account(UserId(1)).await.unwrap();
        rewards.create_account(UserId(2)).await.unwrap();

        let receipt = rewards.transfer(UserId(1), UserId(2), 10).await.unwrap();
        assert_eq!(receipt.from_balance, 40);
        assert_eq!(receipt.to_balance, 60);
        assert_eq!(rewards.total_supply().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn test_failed_debit_moves_nothing() {
        let rewards = spawn();
        rewards.create_account(UserId(2)).await.unwrap();

        let err = rewards.transfer(UserId(1), UserId(2), 10).await.unwrap_err();
        assert_eq!(err, RewardError::NotFound("user_1".into()));
        assert_eq!(rewards.balance(UserId(2)).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_failed_credit_is_inconsistent() {
        let rewards = spawn();
        rewards.create_account(UserId(1)).await.unwrap();

        let err = rewards.transfer(UserId(1), UserId(2), 10).await.unwrap_err();
        assert_eq!(
            err,
            RewardError::Inconsistent {
                from: UserId(1),
                to: UserId(2),
                amount: 10
            }
        );
        // The debit stands; reconciling it is someone else's job.
        assert_eq!(rewards.balance(UserId(1)).await.unwrap(), 40);
    }

    #[tokio::test]
    async fn test_transfer_sends_debit_before_credit() {
        let (client, mut receiver) = create_mock_client::<RewardAccount>(10);
        let rewards = RewardClient::new(client, 50);

        let task = tokio::spawn(async move { rewards.transfer(UserId(1), UserId(2), 10).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("debit");
        assert_eq!((id, action), (UserId(1), RewardAction::Adjust(-10)));
        responder.send(Ok(RewardActionResult::Adjust(40))).unwrap();

        let (id, action, responder) = expect_action(&mut receiver).await.expect("credit");
        assert_eq!((id, action), (UserId(2), RewardAction::Adjust(10)));
        responder.send(Ok(RewardActionResult::Adjust(60))).unwrap();

        let receipt = task.await.unwrap().unwrap();
        assert_eq!(receipt.amount, 10);
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_timeout() {
        let mut mock = MockClient::<RewardAccount>::new();
        mock.expect_action(UserId(1))
            .return_err(FrameworkError::Timeout(std::time::Duration::from_millis(5)));

        let rewards = RewardClient::new(mock.client(), 50);
        assert_eq!(
            rewards.balance(UserId(1)).await.unwrap_err(),
            RewardError::Timeout(std::time::Duration::from_millis(5))
        );
        mock.verify();
    }
}
