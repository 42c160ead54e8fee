//! Data models for the lending domain

pub mod book;
pub mod category;
pub mod lend_book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookStatus, CreateBook, UpdateBook};
pub use category::{Category, CreateCategory, UpdateCategory};
pub use lend_book::{CreateLendBook, LendBook, UpdateLendBook};
pub use user::{CreateUser, UpdateUser, User};

use uuid::Uuid;

/// A text field counts as provided only when present and non-empty
pub(crate) fn provided_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// An id counts as provided only when present and not nil
pub(crate) fn provided_id(value: Option<Uuid>) -> Option<Uuid> {
    value.filter(|id| !id.is_nil())
}
