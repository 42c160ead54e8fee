//! User service contract and validation

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppResult, ValidationError},
    models::user::{CreateUser, UpdateUser, User},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User>;
    async fn find(&self, id: Uuid) -> AppResult<User>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    /// Deletes the user and ends their loans
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub fn validate_create(data: &CreateUser) -> Result<(), ValidationError> {
    if data.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    // An empty email means "no email"
    if data.email().is_some() && data.validate().is_err() {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

pub fn validate_update(data: &UpdateUser) -> Result<(), ValidationError> {
    if data.email().is_some() && data.validate().is_err() {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

/// Rejects structurally invalid user requests before they reach storage
pub struct UserValidation {
    next: Arc<dyn UserService>,
}

impl UserValidation {
    pub fn new(next: Arc<dyn UserService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl UserService for UserValidation {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        if let Err(e) = validate_create(data) {
            tracing::debug!(reason = e.reason(), "Rejected user create");
            return Err(e.into());
        }
        self.next.create(data).await
    }

    async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        if let Err(e) = validate_update(data) {
            tracing::debug!(%id, reason = e.reason(), "Rejected user update");
            return Err(e.into());
        }
        self.next.update(id, data).await
    }

    async fn find(&self, id: Uuid) -> AppResult<User> {
        self.next.find(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.next.find_all().await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.next.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rules() {
        let mut user = CreateUser {
            name: "Dat".to_string(),
            email: None,
        };
        assert_eq!(validate_create(&user), Ok(()));

        user.email = Some(String::new());
        assert_eq!(validate_create(&user), Ok(()));

        user.email = Some("not-an-email".to_string());
        assert_eq!(validate_create(&user), Err(ValidationError::EmailInvalid));

        user.email = Some("dat@example.com".to_string());
        assert_eq!(validate_create(&user), Ok(()));

        user.name = String::new();
        assert_eq!(validate_create(&user), Err(ValidationError::NameRequired));
    }

    #[tokio::test]
    async fn test_bad_email_update_never_reaches_storage() {
        let mut inner = MockUserService::new();
        inner.expect_update().never();
        let service = UserValidation::new(Arc::new(inner));

        let err = service
            .update(
                Uuid::new_v4(),
                &UpdateUser {
                    name: None,
                    email: Some("nope".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "email_invalid");
    }
}
