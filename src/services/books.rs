//! Book service contract and validation

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppResult, ValidationError},
    models::book::{Book, BookStatus, CreateBook, UpdateBook},
};

const NAME_MIN: usize = 5;
const DESCRIPTION_MIN: usize = 5;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookService: Send + Sync {
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;
    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book>;
    async fn find(&self, id: Uuid) -> AppResult<Book>;
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Book>>;
    /// Books with no loan row (`Available`) or with one (`Lent`)
    async fn find_by_status(&self, status: BookStatus) -> AppResult<Vec<Book>>;
    async fn find_by_name_and_status(&self, name: &str, status: BookStatus)
        -> AppResult<Vec<Book>>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn too_short(value: &str, min: usize) -> bool {
    value.chars().count() < min
}

pub fn validate_create(data: &CreateBook) -> Result<(), ValidationError> {
    if data.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if too_short(&data.name, NAME_MIN) {
        return Err(ValidationError::NameTooShort);
    }
    if data.description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    if too_short(&data.description, DESCRIPTION_MIN) {
        return Err(ValidationError::DescriptionTooShort);
    }
    if data.category_id.is_nil() {
        return Err(ValidationError::CategoryRequired);
    }
    Ok(())
}

pub fn validate_update(data: &UpdateBook) -> Result<(), ValidationError> {
    if data.name().is_some_and(|name| too_short(name, NAME_MIN)) {
        return Err(ValidationError::NameTooShort);
    }
    if data
        .description()
        .is_some_and(|description| too_short(description, DESCRIPTION_MIN))
    {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}

/// Rejects structurally invalid book requests before they reach storage
pub struct BookValidation {
    next: Arc<dyn BookService>,
}

impl BookValidation {
    pub fn new(next: Arc<dyn BookService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl BookService for BookValidation {
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        if let Err(e) = validate_create(data) {
            tracing::debug!(reason = e.reason(), "Rejected book create");
            return Err(e.into());
        }
        self.next.create(data).await
    }

    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        if let Err(e) = validate_update(data) {
            tracing::debug!(%id, reason = e.reason(), "Rejected book update");
            return Err(e.into());
        }
        self.next.update(id, data).await
    }

    async fn find(&self, id: Uuid) -> AppResult<Book> {
        self.next.find(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        self.next.find_all().await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Book>> {
        self.next.find_by_name(name).await
    }

    async fn find_by_status(&self, status: BookStatus) -> AppResult<Vec<Book>> {
        self.next.find_by_status(status).await
    }

    async fn find_by_name_and_status(
        &self,
        name: &str,
        status: BookStatus,
    ) -> AppResult<Vec<Book>> {
        self.next.find_by_name_and_status(name, status).await
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

    fn dune(category_id: Uuid) -> CreateBook {
        CreateBook {
            name: "Dune!".to_string(),
            author: "Frank Herbert".to_string(),
            description: "scifi!".to_string(),
            category_id,
        }
    }

    #[test]
    fn test_create_rules_in_order() {
        let category_id = Uuid::new_v4();
        assert_eq!(validate_create(&dune(category_id)), Ok(()));

        let mut book = dune(category_id);
        book.name = String::new();
        book.description = String::new();
        assert_eq!(validate_create(&book), Err(ValidationError::NameRequired));

        book.name = "Dune".to_string();
        assert_eq!(validate_create(&book), Err(ValidationError::NameTooShort));

        book.name = "Dune Messiah".to_string();
        assert_eq!(validate_create(&book), Err(ValidationError::DescriptionRequired));

        book.description = "sf".to_string();
        assert_eq!(validate_create(&book), Err(ValidationError::DescriptionTooShort));

        book.description = "scifi".to_string();
        book.category_id = Uuid::nil();
        assert_eq!(validate_create(&book), Err(ValidationError::CategoryRequired));
    }

    #[test]
    fn test_update_rules() {
        assert_eq!(validate_update(&UpdateBook::default()), Ok(()));
        assert_eq!(
            validate_update(&UpdateBook {
                name: Some("Dune".to_string()),
                ..Default::default()
            }),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            validate_update(&UpdateBook {
                description: Some("bad".to_string()),
                ..Default::default()
            }),
            Err(ValidationError::DescriptionTooShort)
        );
        // Author and category carry no structural rule
        assert_eq!(
            validate_update(&UpdateBook {
                author: Some("X".to_string()),
                category_id: Some(Uuid::nil()),
                ..Default::default()
            }),
            Ok(())
        );
    }

    #[tokio::test]
    async fn test_missing_category_never_reaches_storage() {
        let mut inner = MockBookService::new();
        inner.expect_create().never();
        let service = BookValidation::new(Arc::new(inner));

        let err = service.create(&dune(Uuid::nil())).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::CategoryRequired)
        ));
    }

    #[tokio::test]
    async fn test_update_forwards_partial_request() {
        let id = Uuid::new_v4();
        let mut inner = MockBookService::new();
        inner
            .expect_update()
            .withf(move |got, data| *got == id && data.name() == Some("Children of Dune"))
            .times(1)
            .returning(|id, data| {
                let now = Utc::now();
                Ok(Book {
                    id,
                    name: data.name.clone().unwrap_or_default(),
                    author: "Frank Herbert".to_string(),
                    description: "scifi!".to_string(),
                    category_id: Uuid::new_v4(),
                    created_at: now,
                    updated_at: now,
                })
            });
        let service = BookValidation::new(Arc::new(inner));

        let book = service
            .update(
                id,
                &UpdateBook {
                    name: Some("Children of Dune".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.name, "Children of Dune");
    }

    #[tokio::test]
    async fn test_queries_pass_through() {
        let mut inner = MockBookService::new();
        inner
            .expect_find_by_name_and_status()
            .withf(|name, status| name == "Dune" && *status == BookStatus::Lent)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        inner
            .expect_find_by_status()
            .withf(|status| *status == BookStatus::Available)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let service = BookValidation::new(Arc::new(inner));

        assert!(service
            .find_by_name_and_status("Dune", BookStatus::Lent)
            .await
            .unwrap()
            .is_empty());
        assert!(service
            .find_by_status(BookStatus::Available)
            .await
            .unwrap()
            .is_empty());
    }
}
