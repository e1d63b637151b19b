//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>` and runs everything that involves another store on
//! the caller's task: the balance gate, the requester snapshot, the display-code retry
//! loop, and the stake transfer of a completion. The actor only checks and applies
//! transitions, so one slow settlement never holds up other orders.
//!
//! [`OrderRegistry`] pairs an `OrderClient` with its own [`CodeGenerator`] and is the
//! usual entry point for callers.

use crate::clients::{RewardClient, UserClient};
use crate::codes::CodeGenerator;
use crate::config::ExchangeConfig;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, UserId};
use crate::order_actor::{OrderAction, OrderError};
use crate::reward_actor::RewardError;
use async_trait::async_trait;
use std::cmp::Reverse;
use tracing::{debug, error, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    users: UserClient,
    rewards: RewardClient,
    stake: i64,
    display_code_attempts: u32,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        users: UserClient,
        rewards: RewardClient,
        config: &ExchangeConfig,
    ) -> Self {
        Self {
            inner,
            users,
            rewards,
            stake: config.order_stake,
            display_code_attempts: config.display_code_attempts,
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Timeout(limit)) => OrderError::Timeout(limit),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by_key(|order| Reverse((order.created_at, order.id.0)));
    orders
}

impl OrderClient {
    /// Places an order for `requester`.
    ///
    /// 1. The requester must hold at least the stake; no coins move here.
    /// 2. Their name and phone are read from the identity store for the snapshot.
    /// 3. Each attempt draws a fresh display code and one-time code. The actor refuses
    ///    a display code that is already in use, which costs one attempt; once all
    ///    attempts are spent the result is [`OrderError::IdGenerationFailed`].
    #[instrument(skip(self, codes))]
    pub async fn create_order(
        &self,
        codes: &mut CodeGenerator,
        store: &str,
        details: &str,
        requester: UserId,
    ) -> Result<Order, OrderError> {
        let balance = self.rewards.balance(requester).await?;
        if balance < self.stake {
            return Err(OrderError::InsufficientFunds {
                balance,
                stake: self.stake,
            });
        }
        let profile = self.users.lookup(requester).await?;

        for attempt in 1..=self.display_code_attempts {
            let params = OrderCreate {
                store: store.to_string(),
                details: details.to_string(),
                requester_id: requester,
                requester_name: profile.name.clone(),
                requester_phone: profile.phone.clone(),
                display_code: codes.display_code(),
                one_time_code: codes.one_time_code(),
            };
            match self.inner.create(params).await {
                Ok(order) => {
                    info!(order_id = %order.id, display_code = %order.display_code, attempt, "Order placed");
                    return Ok(order);
                }
                Err(FrameworkError::AlreadyExists(code)) => {
                    warn!(%code, attempt, "Display code collision");
                }
                Err(e) => return Err(Self::map_error(e)),
            }
        }
        Err(OrderError::IdGenerationFailed {
            attempts: self.display_code_attempts,
        })
    }

    /// Accepts the order on behalf of `caller`. The returned view omits the one-time code.
    #[instrument(skip(self))]
    pub async fn accept_order(&self, order_id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.transition(order_id, OrderAction::Accept { caller })
            .await
            .map(Order::redacted)
    }

    /// Completes the order with the code the requester handed over, paying the stake to
    /// the accepter. The returned view omits the one-time code.
    ///
    /// The order is claimed first, so a concurrent completion fails with
    /// [`OrderError::SettlementInProgress`] instead of paying twice. Then the stake moves:
    /// - transfer settled: the order becomes Completed;
    /// - the ledger refused the debit: the claim is released and the order stays Accepted;
    /// - the credit failed, or the debit timed out and may still land: the order becomes
    ///   Completed anyway and [`OrderError::Inconsistent`] is returned.
    #[instrument(skip(self, code))]
    pub async fn complete_order(
        &self,
        order_id: OrderId,
        caller: UserId,
        code: &str,
    ) -> Result<Order, OrderError> {
        debug!("Claiming order");
        let claim = OrderAction::ClaimCompletion {
            caller,
            code: code.to_string(),
        };
        let claimed = self.transition(order_id, claim).await?;
        let (from, to, amount) = (claimed.requester_id, caller, self.stake);

        match self.rewards.transfer(from, to, amount).await {
            Ok(receipt) => {
                let done = self.settle(order_id, OrderAction::FinishCompletion).await?;
                info!(
                    amount,
                    requester_balance = receipt.from_balance,
                    accepter_balance = receipt.to_balance,
                    "Order completed"
                );
                Ok(done.redacted())
            }
            Err(e @ (RewardError::Inconsistent { .. } | RewardError::Timeout(_))) => {
                // Coins may have left the requester; the order must never be settled again.
                self.settle(order_id, OrderAction::FinishCompletion).await?;
                error!(%from, %to, amount, error = %e, "Order completed with unsettled stake");
                Err(OrderError::Inconsistent {
                    order_id,
                    from,
                    to,
                    amount,
                })
            }
            Err(e) => {
                warn!(error = %e, "Ledger refused the debit, releasing order");
                self.settle(order_id, OrderAction::ReleaseCompletion).await?;
                Err(OrderError::Ledger(e))
            }
        }
    }

    /// Ends a claimed completion. A failure here leaves the order settling, which blocks
    /// further completions until it is resolved by hand.
    async fn settle(&self, order_id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.transition(order_id, action)
            .await
            .inspect_err(|e| error!(%order_id, error = %e, "Order left settling"))
    }

    /// Withdraws an order nobody has accepted yet. Requester only.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.transition(order_id, OrderAction::Cancel { caller }).await
    }

    async fn transition(&self, order_id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.inner
            .perform_action(order_id, action)
            .await
            .map(|result| result.into_order())
            .map_err(Self::map_error)
    }

    /// One order as `caller` may see it: the requester gets the one-time code, anyone
    /// else a redacted view.
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        let order = self
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        if order.requester_id == caller {
            Ok(order)
        } else {
            Ok(order.redacted())
        }
    }

    /// Orders `user` placed, in any status, newest first.
    #[instrument(skip(self))]
    pub async fn list_mine(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(newest_first(self.list(OrderQuery::Mine(user)).await?))
    }

    /// Other users' orders waiting for an accepter, newest first, without one-time codes.
    #[instrument(skip(self))]
    pub async fn list_available(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.list(OrderQuery::Available(user)).await?;
        Ok(newest_first(orders).into_iter().map(Order::redacted).collect())
    }

    /// Orders `user` accepted and has yet to complete, newest first, without one-time codes.
    #[instrument(skip(self))]
    pub async fn list_accepted_by_me(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        let orders = self.list(OrderQuery::AcceptedBy(user)).await?;
        Ok(newest_first(orders).into_iter().map(Order::redacted).collect())
    }
}

/// An [`OrderClient`] with its own code generator.
///
/// Hand one to each task that places orders; generators are never shared.
pub struct OrderRegistry {
    orders: OrderClient,
    codes: CodeGenerator,
}

impl OrderRegistry {
    pub fn new(orders: OrderClient, codes: CodeGenerator) -> Self {
        Self { orders, codes }
    }

    pub async fn create_order(
        &mut self,
        store: &str,
        details: &str,
        requester: UserId,
    ) -> Result<Order, OrderError> {
        self.orders
            .create_order(&mut self.codes, store, details, requester)
            .await
    }

    pub async fn accept_order(&self, order_id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        self.orders.accept_order(order_id, caller).await
    }

    pub async fn complete_order(
        &self,
        order_id: OrderId,
        caller: UserId,
        code: &str,
    ) -> Result<Order, OrderError> {
        self.orders.complete_order(order_id, caller, code).await
    }

    pub async fn cancel_order(&self, order_id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        self.orders.cancel_order(order_id, caller).await
    }

    pub async fn get_order(&self, order_id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        self.orders.get_order(order_id, caller).await
    }

    pub async fn list_mine(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        self.orders.list_mine(user).await
    }

    pub async fn list_available(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        self.orders.list_available(user).await
    }

    pub async fn list_accepted_by_me(&self, user: UserId) -> Result<Vec<Order>, OrderError> {
        self.orders.list_accepted_by_me(user).await
    }

    pub fn client(&self) -> &OrderClient {
        &self.orders
    }
}
