//! Lend books repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{book_exists, book_lent, translate_write_error, user_exists};
use crate::{
    error::{AppError, AppResult, ConflictError, Entity, MissingReference, ValidationError},
    models::lend_book::{CreateLendBook, LendBook, UpdateLendBook},
    services::LendBookService,
};

#[derive(Clone)]
pub struct LendBooksRepository {
    pool: Pool<Postgres>,
}

impl LendBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LendBookService for LendBooksRepository {
    /// Lend a book.
    ///
    /// Checks run in order (book exists, book not lent, user exists) so the
    /// first failure is reported. The insert is conditional on the unique key
    /// over `book_id`: of two concurrent loans for one book, exactly one row
    /// is written and the other caller gets `BookAlreadyLent`.
    #[tracing::instrument(skip(self, data), fields(book_id = %data.book_id, user_id = %data.user_id))]
    async fn create(&self, data: &CreateLendBook) -> AppResult<LendBook> {
        // Only reachable when called without LendBookValidation in front
        let from = data.from.ok_or(ValidationError::LoanStartRequired)?;
        let to = data.to.ok_or(ValidationError::LoanEndRequired)?;

        if !book_exists(&self.pool, data.book_id).await? {
            return Err(MissingReference::Book.into());
        }
        if book_lent(&self.pool, data.book_id).await? {
            return Err(ConflictError::BookAlreadyLent.into());
        }
        if !user_exists(&self.pool, data.user_id).await? {
            return Err(MissingReference::User.into());
        }

        let now = Utc::now();
        let loan = sqlx::query_as::<_, LendBook>(
            r#"
            INSERT INTO lend_books (id, book_id, user_id, loan_from, loan_to, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (book_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book_id)
        .bind(data.user_id)
        .bind(from)
        .bind(to)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate_write_error)?
        .ok_or(ConflictError::BookAlreadyLent)?;

        tracing::info!(id = %loan.id, "Book lent");
        Ok(loan)
    }

    /// Partially update a loan, re-checking a moved book or borrower
    #[tracing::instrument(skip(self, data))]
    async fn update(&self, id: Uuid, data: &UpdateLendBook) -> AppResult<LendBook> {
        let mut tx = self.pool.begin().await?;

        let mut loan =
            sqlx::query_as::<_, LendBook>("SELECT * FROM lend_books WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::not_found(Entity::LendBook, id))?;

        if let Some(book_id) = loan.moved_book(data) {
            if !book_exists(&mut *tx, book_id).await? {
                return Err(MissingReference::Book.into());
            }
            if book_lent(&mut *tx, book_id).await? {
                return Err(ConflictError::BookAlreadyLent.into());
            }
        }
        if let Some(user_id) = loan.moved_user(data) {
            if !user_exists(&mut *tx, user_id).await? {
                return Err(MissingReference::User.into());
            }
        }

        if !loan.apply(data) {
            return Ok(loan);
        }

        // A racing loan on the new book surfaces as a unique violation here
        let loan = sqlx::query_as::<_, LendBook>(
            r#"
            UPDATE lend_books
            SET book_id = $2, user_id = $3, loan_from = $4, loan_to = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(loan.book_id)
        .bind(loan.user_id)
        .bind(loan.from)
        .bind(loan.to)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Get loan by ID
    async fn find(&self, id: Uuid) -> AppResult<LendBook> {
        sqlx::query_as::<_, LendBook>("SELECT * FROM lend_books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::LendBook, id))
    }

    /// List all loans
    async fn find_all(&self) -> AppResult<Vec<LendBook>> {
        let rows = sqlx::query_as::<_, LendBook>("SELECT * FROM lend_books ORDER BY loan_from")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Delete a loan, which returns the book
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM lend_books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(Entity::LendBook, id));
        }

        tracing::info!(%id, "Book returned");
        Ok(())
    }
}
