//! Entity trait implementation for the User domain type.
//!
//! Users are keyed by a generated [`UserId`] and indexed uniquely by their normalized
//! email, so a second registration with the same address is refused by the actor itself.

use crate::framework::ActorEntity;
use crate::model::{email_key, User, UserCreate, UserId, UserQuery, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use chrono::Utc;

fn require(field: &str, value: &str) -> Result<(), UserError> {
    if value.trim().is_empty() {
        return Err(UserError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Query = UserQuery;
    type Context = ();
    type Error = UserError;

    /// Builds the profile, rejecting a missing name or a malformed email.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        require("name", &params.name)?;
        require("email", &params.email)?;
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "email {:?} is not an address",
                params.email
            )));
        }

        Ok(Self {
            id,
            email: params.email.trim().to_string(),
            name: params.name,
            phone: params.phone,
            enrollment: params.enrollment,
            hostel: params.hostel,
            branch: params.branch,
            year: params.year,
            created_at: Utc::now(),
        })
    }

    fn id(&self) -> &UserId {
        &self.id
    }

    fn unique_key(&self) -> Option<String> {
        Some(email_key(&self.email))
    }

    fn matches(&self, query: &UserQuery) -> bool {
        match query {
            UserQuery::ByEmail(email) => email_key(&self.email) == email_key(email),
        }
    }

    /// Applies the provided fields. An empty name is refused before anything changes.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            require("name", name)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(hostel) = update.hostel {
            self.hostel = hostel;
        }
        if let Some(branch) = update.branch {
            self.branch = branch;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(email: &str, name: &str) -> UserCreate {
        UserCreate::new(email, name, "555-0100")
    }

    #[test]
    fn test_from_create_params_validates() {
        let user = User::from_create_params(UserId(1), create(" Asha@Campus.edu ", "Asha")).unwrap();
        assert_eq!(user.email, "Asha@Campus.edu");
        assert_eq!(user.unique_key().as_deref(), Some("asha@campus.edu"));

        let err = User::from_create_params(UserId(2), create("asha@campus.edu", " ")).unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));

        let err = User::from_create_params(UserId(3), create("not-an-email", "Ravi")).unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));
    }

    #[test]
    fn test_email_query_ignores_case() {
        let user = User::from_create_params(UserId(1), create("ravi@campus.edu", "Ravi")).unwrap();
        assert!(user.matches(&UserQuery::ByEmail("RAVI@campus.edu".into())));
        assert!(!user.matches(&UserQuery::ByEmail("asha@campus.edu".into())));
    }

    #[tokio::test]
    async fn test_update_keeps_email_and_rejects_blank_name() {
        let mut user = User::from_create_params(UserId(1), create("ravi@campus.edu", "Ravi")).unwrap();

        let edit = UserUpdate {
            hostel: Some("H4".into()),
            phone: Some("555-0199".into()),
            ..UserUpdate::default()
        };
        user.on_update(edit, &()).await.unwrap();
        assert_eq!(user.hostel, "H4");
        assert_eq!(user.phone, "555-0199");
        assert_eq!(user.email, "ravi@campus.edu");

        let blank = UserUpdate {
            name: Some(String::new()),
            year: Some("3".into()),
            ..UserUpdate::default()
        };
        assert!(user.on_update(blank, &()).await.is_err());
        assert_eq!(user.name, "Ravi");
        assert_eq!(user.year, "");
    }
}
