//! Category service contract and validation

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppResult, ValidationError},
    models::category::{Category, CreateCategory, UpdateCategory},
};

/// Names must be strictly longer than this
const NAME_MIN_EXCLUSIVE: usize = 5;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(&self, data: &CreateCategory) -> AppResult<Category>;
    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category>;
    async fn find(&self, id: Uuid) -> AppResult<Category>;
    async fn find_all(&self) -> AppResult<Vec<Category>>;
    /// Deletes the category together with every book filed under it
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() <= NAME_MIN_EXCLUSIVE {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

pub fn validate_create(data: &CreateCategory) -> Result<(), ValidationError> {
    if data.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    check_name(&data.name)
}

pub fn validate_update(data: &UpdateCategory) -> Result<(), ValidationError> {
    match data.name() {
        Some(name) => check_name(name),
        None => Ok(()),
    }
}

/// Rejects structurally invalid category requests before they reach storage
pub struct CategoryValidation {
    next: Arc<dyn CategoryService>,
}

impl CategoryValidation {
    pub fn new(next: Arc<dyn CategoryService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl CategoryService for CategoryValidation {
    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        if let Err(e) = validate_create(data) {
            tracing::debug!(reason = e.reason(), "Rejected category create");
            return Err(e.into());
        }
        self.next.create(data).await
    }

    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        if let Err(e) = validate_update(data) {
            tracing::debug!(%id, reason = e.reason(), "Rejected category update");
            return Err(e.into());
        }
        self.next.update(id, data).await
    }

    async fn find(&self, id: Uuid) -> AppResult<Category> {
        self.next.find(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Category>> {
        self.next.find_all().await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.next.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::error::AppError;

    fn create(name: &str) -> CreateCategory {
        CreateCategory {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_create_rules() {
        assert_eq!(validate_create(&create("")), Err(ValidationError::NameRequired));
        assert_eq!(validate_create(&create("Poems")), Err(ValidationError::NameTooShort));
        assert_eq!(validate_create(&create("Novels")), Ok(()));
        assert_eq!(validate_create(&create("Fictions")), Ok(()));
    }

    #[test]
    fn test_update_rules() {
        assert_eq!(validate_update(&UpdateCategory::default()), Ok(()));
        assert_eq!(
            validate_update(&UpdateCategory {
                name: Some(String::new())
            }),
            Ok(())
        );
        assert_eq!(
            validate_update(&UpdateCategory {
                name: Some("Short".to_string())
            }),
            Err(ValidationError::NameTooShort)
        );
    }

    #[tokio::test]
    async fn test_short_name_never_reaches_storage() {
        let mut inner = MockCategoryService::new();
        inner.expect_create().never();
        let service = CategoryValidation::new(Arc::new(inner));

        for name in ["", "a", "Poems"] {
            let err = service.create(&create(name)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{name:?}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_valid_create_is_forwarded() {
        let mut inner = MockCategoryService::new();
        inner
            .expect_create()
            .withf(|data| data.name == "Fictions")
            .times(1)
            .returning(|data| {
                let now = Utc::now();
                Ok(Category {
                    id: Uuid::new_v4(),
                    name: data.name.clone(),
                    created_at: now,
                    updated_at: now,
                })
            });
        let service = CategoryValidation::new(Arc::new(inner));

        let category = service.create(&create("Fictions")).await.unwrap();
        assert_eq!(category.name, "Fictions");
    }

    #[tokio::test]
    async fn test_invalid_update_never_reaches_storage() {
        let mut inner = MockCategoryService::new();
        inner.expect_update().never();
        let service = CategoryValidation::new(Arc::new(inner));

        let err = service
            .update(
                Uuid::new_v4(),
                &UpdateCategory {
                    name: Some("Tiny".to_string()),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "name_too_short");
    }

    #[tokio::test]
    async fn test_delete_passes_through() {
        let id = Uuid::new_v4();
        let mut inner = MockCategoryService::new();
        inner
            .expect_delete()
            .withf(move |got| *got == id)
            .times(1)
            .returning(|_| Ok(()));
        let service = CategoryValidation::new(Arc::new(inner));

        tokio_test::assert_ok!(service.delete(id).await);
    }
}
