//! Repository layer: PostgreSQL persistence for every entity
//!
//! Each repository implements its entity's service trait and enforces the
//! referential invariants that need other tables. Queries are explicit; a
//! missing row is always an explicit `fetch_optional` branch.

pub mod books;
pub mod categories;
pub mod lend_books;
pub mod users;

use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

use crate::error::{violated_constraint, AppError, AppResult, ConflictError, MissingReference};

/// Constraint names declared in `migrations/`
pub(crate) mod constraints {
    pub const CATEGORY_NAME_KEY: &str = "categories_name_key";
    pub const BOOK_CATEGORY_FKEY: &str = "books_category_id_fkey";
    pub const LEND_BOOK_BOOK_KEY: &str = "lend_books_book_id_key";
    pub const LEND_BOOK_BOOK_FKEY: &str = "lend_books_book_id_fkey";
    pub const LEND_BOOK_USER_FKEY: &str = "lend_books_user_id_fkey";
}

const CATEGORY_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)";
const BOOK_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)";
const USER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)";
const BOOK_LENT: &str = "SELECT EXISTS(SELECT 1 FROM lend_books WHERE book_id = $1)";

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: categories::CategoriesRepository,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub lend_books: lend_books::LendBooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: categories::CategoriesRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            lend_books: lend_books::LendBooksRepository::new(pool.clone()),
            pool,
        }
    }
}

async fn exists<'e, E>(executor: E, query: &'static str, id: Uuid) -> AppResult<bool>
where
    E: PgExecutor<'e>,
{
    let found = sqlx::query_scalar::<_, bool>(query)
        .bind(id)
        .fetch_one(executor)
        .await?;
    Ok(found)
}

pub(crate) async fn category_exists<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> AppResult<bool> {
    exists(executor, CATEGORY_EXISTS, id).await
}

pub(crate) async fn book_exists<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> AppResult<bool> {
    exists(executor, BOOK_EXISTS, id).await
}

pub(crate) async fn user_exists<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> AppResult<bool> {
    exists(executor, USER_EXISTS, id).await
}

/// Whether the book currently has a loan row
pub(crate) async fn book_lent<'e, E: PgExecutor<'e>>(executor: E, book_id: Uuid) -> AppResult<bool> {
    exists(executor, BOOK_LENT, book_id).await
}

/// Translate constraint violations raised by inserts and updates.
///
/// Only for write paths: a foreign key failure there means the referenced
/// row is gone. Anything unrecognised stays a database error.
pub(crate) fn translate_write_error(err: sqlx::Error) -> AppError {
    use constraints::*;

    let translated: Option<AppError> = match violated_constraint(&err) {
        Some(CATEGORY_NAME_KEY) => Some(ConflictError::NameAlreadyExists.into()),
        Some(LEND_BOOK_BOOK_KEY) => Some(ConflictError::BookAlreadyLent.into()),
        Some(BOOK_CATEGORY_FKEY) => Some(MissingReference::Category.into()),
        Some(LEND_BOOK_BOOK_FKEY) => Some(MissingReference::Book.into()),
        Some(LEND_BOOK_USER_FKEY) => Some(MissingReference::User.into()),
        _ => None,
    };
    translated.unwrap_or_else(|| AppError::Database(err))
}
