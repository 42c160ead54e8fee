//! Service layer: per-entity contracts and their validation middleware
//!
//! Each entity is exposed through an async trait. The persistence
//! implementations live in [`crate::repository`]; the validation layers here
//! wrap any implementation of the same trait, so the final service for an
//! entity is `Validation(Persistence)`.

pub mod books;
pub mod categories;
pub mod lend_books;
pub mod users;

use std::sync::Arc;

use crate::repository::Repository;

pub use books::{BookService, BookValidation};
pub use categories::{CategoryService, CategoryValidation};
pub use lend_books::{LendBookService, LendBookValidation};
pub use users::{UserService, UserValidation};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: Arc<dyn CategoryService>,
    pub books: Arc<dyn BookService>,
    pub users: Arc<dyn UserService>,
    pub lend_books: Arc<dyn LendBookService>,
}

impl Services {
    /// Compose every entity service over the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            categories: Arc::new(CategoryValidation::new(Arc::new(repository.categories))),
            books: Arc::new(BookValidation::new(Arc::new(repository.books))),
            users: Arc::new(UserValidation::new(Arc::new(repository.users))),
            lend_books: Arc::new(LendBookValidation::new(Arc::new(repository.lend_books))),
        }
    }
}
