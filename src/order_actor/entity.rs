//! Entity trait implementation for the Order domain type.
//!
//! This is where the lifecycle lives. Every check for a transition runs before the
//! record is touched, so a refused transition leaves the order exactly as it was. The
//! actor never waits on another store: the balance gate, the requester snapshot and the
//! stake transfer all happen in [`OrderClient`](crate::clients::OrderClient), and a
//! completion holds the order in a settling state while the stake moves.

use super::actions::{OrderAction, OrderActionResult};
use crate::framework::{ActorEntity, NoUpdate};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderStatus, UserId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

impl Order {
    fn wrong_state(&self, action: &'static str) -> OrderError {
        OrderError::WrongState {
            order_id: self.id,
            status: self.status,
            action,
        }
    }

    fn accept(&mut self, caller: UserId) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::NotAccepted => {}
            OrderStatus::Accepted => return Err(OrderError::AlreadyAccepted(self.id)),
            _ => return Err(self.wrong_state("accept")),
        }
        if caller == self.requester_id {
            return Err(OrderError::SelfAccept(self.id));
        }
        if self.accepter_id.is_some() {
            return Err(OrderError::AlreadyAccepted(self.id));
        }

        self.accepter_id = Some(caller);
        self.status = OrderStatus::Accepted;
        Ok(())
    }

    /// Accepted → settling, for the accepter holding the right code.
    fn claim_completion(&mut self, caller: UserId, code: &str) -> Result<(), OrderError> {
        if matches!(self.status, OrderStatus::NotAccepted | OrderStatus::Cancelled) {
            return Err(self.wrong_state("complete"));
        }
        if self.accepter_id != Some(caller) {
            return Err(OrderError::NotYourOrder {
                order_id: self.id,
                caller,
            });
        }
        if self.status.is_terminal() {
            return Err(self.wrong_state("complete"));
        }
        if self.settling {
            return Err(OrderError::SettlementInProgress(self.id));
        }
        if self.one_time_code.as_deref() != Some(code.trim()) {
            return Err(OrderError::InvalidCode(self.id));
        }

        self.settling = true;
        Ok(())
    }

    fn finish_completion(&mut self) -> Result<(), OrderError> {
        if !self.settling {
            return Err(self.wrong_state("finish completing"));
        }
        self.settling = false;
        self.status = OrderStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn release_completion(&mut self) -> Result<(), OrderError> {
        if !self.settling {
            return Err(self.wrong_state("release"));
        }
        self.settling = false;
        Ok(())
    }

    fn cancel(&mut self, caller: UserId) -> Result<(), OrderError> {
        if caller != self.requester_id {
            return Err(OrderError::NotYourOrder {
                order_id: self.id,
                caller,
            });
        }
        if self.status != OrderStatus::NotAccepted {
            return Err(self.wrong_state("cancel"));
        }

        self.status = OrderStatus::Cancelled;
        self.cancelled_at = Some(Utc::now());
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = NoUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Query = OrderQuery;
    type Context = ();
    type Error = OrderError;

    /// Creates a NotAccepted order from codes and a requester snapshot gathered by the client.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            display_code: params.display_code,
            store: params.store,
            details: params.details,
            status: OrderStatus::NotAccepted,
            one_time_code: Some(params.one_time_code),
            requester_id: params.requester_id,
            requester_name: params.requester_name,
            requester_phone: params.requester_phone,
            accepter_id: None,
            settling: false,
            created_at: Utc::now(),
            completed_at: None,
            cancelled_at: None,
        })
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.display_code.clone())
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match *query {
            OrderQuery::Mine(user) => self.requester_id == user,
            OrderQuery::Available(user) => {
                self.requester_id != user && self.status == OrderStatus::NotAccepted
            }
            OrderQuery::AcceptedBy(user) => {
                self.accepter_id == Some(user) && self.status == OrderStatus::Accepted
            }
        }
    }

    async fn on_update(&mut self, update: NoUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        Err(OrderError::Retained(self.id.to_string()))
    }

    /// Handles the lifecycle transitions.
    ///
    /// # Actions
    /// - `Accept`: NotAccepted → Accepted, by anyone but the requester
    /// - `ClaimCompletion`: Accepted → settling, by the accepter with the right code
    /// - `FinishCompletion`: settling → Completed
    /// - `ReleaseCompletion`: settling → Accepted
    /// - `Cancel`: NotAccepted → Cancelled, by the requester
    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Accept { caller } => {
                self.accept(caller)?;
                info!(order_id = %self.id, accepter = %caller, "Order accepted");
                Ok(OrderActionResult::Accept(self.clone()))
            }
            OrderAction::ClaimCompletion { caller, code } => {
                self.claim_completion(caller, &code)?;
                Ok(OrderActionResult::ClaimCompletion(self.clone()))
            }
            OrderAction::FinishCompletion => {
                self.finish_completion()?;
                Ok(OrderActionResult::FinishCompletion(self.clone()))
            }
            OrderAction::ReleaseCompletion => {
                self.release_completion()?;
                Ok(OrderActionResult::ReleaseCompletion(self.clone()))
            }
            OrderAction::Cancel { caller } => {
                self.cancel(caller)?;
                info!(order_id = %self.id, "Order cancelled");
                Ok(OrderActionResult::Cancel(self.clone()))
            }
        }
    }
}
