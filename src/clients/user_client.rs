//! # User Client
//!
//! Provides a high-level API for interacting with the `User` actor.
//! It wraps a `ResourceClient<User>` and exposes domain-specific methods.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{email_key, User, UserCreate, UserId, UserQuery, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<UserError>() {
            Ok(err) => err,
            Err(FrameworkError::AlreadyExists(email)) => UserError::AlreadyExists(email),
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(FrameworkError::Timeout(limit)) => UserError::Timeout(limit),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl UserClient {
    /// Registers a user. A second registration with the same email (ignoring case)
    /// fails with [`UserError::AlreadyExists`].
    #[instrument(skip(self), fields(email = %params.email))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// The identity lookup: the user's record, or [`UserError::NotFound`].
    #[instrument(skip(self))]
    pub async fn lookup(&self, id: UserId) -> Result<User, UserError> {
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Finds the account registered under `email`, if any.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let mut found = self.list(UserQuery::ByEmail(email_key(email))).await?;
        Ok(found.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ResourceActor;

    fn spawn() -> UserClient {
        let (actor, client) = ResourceActor::<User>::new(10);
        tokio::spawn(actor.run(()));
        UserClient::new(client)
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let users = spawn();
        let asha = users
            .create_user(UserCreate::new("asha@campus.edu", "Asha", "555-0101"))
            .await
            .unwrap();
        assert_eq!(asha.id, UserId(1));

        let found = users.lookup(asha.id).await.unwrap();
        assert_eq!(found.phone, "555-0101");

        let by_email = users.find_by_email("ASHA@campus.edu").await.unwrap().unwrap();
        assert_eq!(by_email.id, asha.id);
        assert!(users.find_by_email("nobody@campus.edu").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_refused() {
        let users = spawn();
        users
            .create_user(UserCreate::new("ravi@campus.edu", "Ravi", "555-0102"))
            .await
            .unwrap();

        let err = users
            .create_user(UserCreate::new("Ravi@Campus.edu", "Ravi Again", "555-0103"))
            .await
            .unwrap_err();
        assert_eq!(err, UserError::AlreadyExists("ravi@campus.edu".into()));
    }

    #[tokio::test]
    async fn test_lookup_missing_user() {
        let users = spawn();
        assert_eq!(
            users.lookup(UserId(9)).await.unwrap_err(),
            UserError::NotFound("user_9".into())
        );
    }

    #[tokio::test]
    async fn test_validation_error_comes_back_typed() {
        let users = spawn();
        let err = users
            .create_user(UserCreate::new("no-at-sign", "Meera", "555-0104"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let users = spawn();
        let meera = users
            .create_user(UserCreate::new("meera@campus.edu", "Meera", "555-0105"))
            .await
            .unwrap();
        let updated = users
            .update_user(
                meera.id,
                UserUpdate {
                    hostel: Some("H2".into()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.hostel, "H2");

        let err = users
            .update_user(UserId(42), UserUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err, UserError::NotFound("user_42".into()));
    }
}
