//! Books repository for database operations
//!
//! Availability is never stored: a book is lent exactly when a `lend_books`
//! row references it, and the unique key on `lend_books.book_id` keeps that
//! to at most one row.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{category_exists, translate_write_error};
use crate::{
    error::{AppError, AppResult, Entity, MissingReference},
    models::book::{Book, BookStatus, CreateBook, UpdateBook},
    services::BookService,
};

const AVAILABLE_BOOKS: &str = r#"
    SELECT b.* FROM books b
    WHERE NOT EXISTS (SELECT 1 FROM lend_books l WHERE l.book_id = b.id)
    ORDER BY b.created_at
"#;

const LENT_BOOKS: &str = r#"
    SELECT b.* FROM books b
    JOIN lend_books l ON l.book_id = b.id
    ORDER BY b.created_at
"#;

const AVAILABLE_BOOKS_BY_NAME: &str = r#"
    SELECT b.* FROM books b
    WHERE b.name = $1
      AND NOT EXISTS (SELECT 1 FROM lend_books l WHERE l.book_id = b.id)
    ORDER BY b.created_at
"#;

const LENT_BOOKS_BY_NAME: &str = r#"
    SELECT b.* FROM books b
    JOIN lend_books l ON l.book_id = b.id
    WHERE b.name = $1
    ORDER BY b.created_at
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookService for BooksRepository {
    /// Insert a book filed under an existing category
    #[tracing::instrument(skip(self, data), fields(category_id = %data.category_id))]
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        if !category_exists(&self.pool, data.category_id).await? {
            return Err(MissingReference::Category.into());
        }

        let now = Utc::now();
        // The foreign key catches a category deleted since the check
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, name, author, description, category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.author)
        .bind(&data.description)
        .bind(data.category_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(translate_write_error)?;

        tracing::info!(id = %book.id, "Book created");
        Ok(book)
    }

    /// Partially update a book, re-checking a new category
    #[tracing::instrument(skip(self, data))]
    async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let mut book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Book, id))?;

        if let Some(category_id) = data.category_id() {
            if !category_exists(&mut *tx, category_id).await? {
                return Err(MissingReference::Category.into());
            }
        }

        if !book.apply(data) {
            return Ok(book);
        }

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET name = $2, author = $3, description = $4, category_id = $5, updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.category_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;
        Ok(book)
    }

    /// Get book by ID
    async fn find(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Book, id))
    }

    /// List all books
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Books whose name equals `name` exactly
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Book>> {
        let rows =
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE name = $1 ORDER BY created_at")
                .bind(name)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn find_by_status(&self, status: BookStatus) -> AppResult<Vec<Book>> {
        let query = match status {
            BookStatus::Available => AVAILABLE_BOOKS,
            BookStatus::Lent => LENT_BOOKS,
        };
        let rows = sqlx::query_as::<_, Book>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_name_and_status(
        &self,
        name: &str,
        status: BookStatus,
    ) -> AppResult<Vec<Book>> {
        let query = match status {
            BookStatus::Available => AVAILABLE_BOOKS_BY_NAME,
            BookStatus::Lent => LENT_BOOKS_BY_NAME,
        };
        let rows = sqlx::query_as::<_, Book>(query)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Delete a book and its loan
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Book, id))?;

        sqlx::query("DELETE FROM lend_books WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%id, "Book deleted");
        Ok(())
    }
}
