//! Lend book service contract and validation

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppResult, ValidationError},
    models::lend_book::{CreateLendBook, LendBook, UpdateLendBook},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LendBookService: Send + Sync {
    /// Lends a book; fails with a conflict when the book is already on loan
    async fn create(&self, data: &CreateLendBook) -> AppResult<LendBook>;
    async fn update(&self, id: Uuid, data: &UpdateLendBook) -> AppResult<LendBook>;
    async fn find(&self, id: Uuid) -> AppResult<LendBook>;
    async fn find_all(&self) -> AppResult<Vec<LendBook>>;
    /// Ends the loan, making the book available again
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub fn validate_create(data: &CreateLendBook) -> Result<(), ValidationError> {
    if data.book_id.is_nil() {
        return Err(ValidationError::BookIdRequired);
    }
    if data.user_id.is_nil() {
        return Err(ValidationError::UserIdRequired);
    }
    if data.from.is_none() {
        return Err(ValidationError::LoanStartRequired);
    }
    if data.to.is_none() {
        return Err(ValidationError::LoanEndRequired);
    }
    Ok(())
}

/// Rejects incomplete loan requests before they reach storage
pub struct LendBookValidation {
    next: Arc<dyn LendBookService>,
}

impl LendBookValidation {
    pub fn new(next: Arc<dyn LendBookService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl LendBookService for LendBookValidation {
    async fn create(&self, data: &CreateLendBook) -> AppResult<LendBook> {
        if let Err(e) = validate_create(data) {
            tracing::debug!(reason = e.reason(), "Rejected lend book create");
            return Err(e.into());
        }
        self.next.create(data).await
    }

    async fn update(&self, id: Uuid, data: &UpdateLendBook) -> AppResult<LendBook> {
        self.next.update(id, data).await
    }

    async fn find(&self, id: Uuid) -> AppResult<LendBook> {
        self.next.find(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<LendBook>> {
        self.next.find_all().await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.next.delete(id).await
    }
}
