use crate::model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Where an order is in its lifecycle.
///
/// ```text
/// NotAccepted ──accept──▶ Accepted ──complete──▶ Completed
///      │
///      └──cancel──▶ Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    NotAccepted,
    Accepted,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::NotAccepted => "NotAccepted",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Represents an errand posted on the exchange.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Lifecycle transitions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing reference, `#NBO` followed by five digits. Unique across orders.
    pub display_code: String,
    pub store: String,
    pub details: String,
    pub status: OrderStatus,
    /// Handshake code the requester hands over on delivery. `None` only in views
    /// returned to someone other than the requester.
    pub one_time_code: Option<String>,
    pub requester_id: UserId,
    /// Copied from the requester's profile when the order was placed.
    pub requester_name: String,
    pub requester_phone: String,
    pub accepter_id: Option<UserId>,
    /// Set while the stake is being moved for a completion. No transition is accepted
    /// until the settlement is finished or released.
    #[serde(default)]
    pub settling: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Payload for placing a new order.
///
/// The codes and the requester snapshot are gathered by the caller, so the actor never
/// waits on randomness or on another store.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub store: String,
    pub details: String,
    pub requester_id: UserId,
    pub requester_name: String,
    pub requester_phone: String,
    pub display_code: String,
    pub one_time_code: String,
}

#[derive(Debug, Clone, Copy)]
pub enum OrderQuery {
    /// Orders the user placed, any status.
    Mine(UserId),
    /// Other users' orders still waiting for someone.
    Available(UserId),
    /// Orders the user accepted and has not completed yet.
    AcceptedBy(UserId),
}

impl Order {
    /// Copy of this order with the one-time code removed.
    pub fn redacted(mut self) -> Self {
        self.one_time_code = None;
        self
    }
}
