//! Categories repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::translate_write_error;
use crate::{
    error::{AppError, AppResult, Entity},
    models::category::{Category, CreateCategory, UpdateCategory},
    services::CategoryService,
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryService for CategoriesRepository {
    /// Insert a category; a duplicate name is a conflict
    #[tracing::instrument(skip(self, data))]
    async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let now = Utc::now();
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(translate_write_error)?;

        tracing::info!(id = %category.id, "Category created");
        Ok(category)
    }

    /// Rename a category; uniqueness is checked against the merged name
    #[tracing::instrument(skip(self, data))]
    async fn update(&self, id: Uuid, data: &UpdateCategory) -> AppResult<Category> {
        let mut tx = self.pool.begin().await?;

        let mut category =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::not_found(Entity::Category, id))?;

        if !category.apply(data) {
            return Ok(category);
        }

        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&category.name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(translate_write_error)?;

        tx.commit().await?;
        Ok(category)
    }

    /// Get category by ID
    async fn find(&self, id: Uuid) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Category, id))
    }

    /// List all categories
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Delete a category, its books and their loans in one transaction
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Row lock holds off concurrent book inserts into this category
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(Entity::Category, id))?;

        let loans = sqlx::query(
            "DELETE FROM lend_books WHERE book_id IN (SELECT id FROM books WHERE category_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let books = sqlx::query("DELETE FROM books WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%id, books, loans, "Category deleted");
        Ok(())
    }
}
