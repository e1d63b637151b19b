use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Users.
///
/// Reward accounts are keyed by the same value, so one user has at most one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// Represents a registered student.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`impl ActorEntity for User`](#impl-ActorEntity-for-User) for details on:
/// - Creation parameters ([`UserCreate`])
/// - Update parameters ([`UserUpdate`])
/// - Lookups ([`UserQuery`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub enrollment: String,
    pub hostel: String,
    pub branch: String,
    pub year: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new user.
///
/// Password handling stays with the caller; the store only keeps the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub enrollment: String,
    pub hostel: String,
    pub branch: String,
    pub year: String,
}

/// Payload for editing a profile. The email is fixed at registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub hostel: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
}

/// Filters for listing users.
#[derive(Debug, Clone)]
pub enum UserQuery {
    /// Case-insensitive match on the registration email.
    ByEmail(String),
}

impl UserCreate {
    /// Minimal registration with just the fields the exchange itself reads.
    pub fn new(email: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }
}

/// Normalized form of an email used for uniqueness and lookup.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
