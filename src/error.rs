//! Error types for the lending server
//!
//! Every error carries a classification ([`ErrorKind`]) and a stable
//! machine-readable reason. Nothing here knows about HTTP; the API layer maps
//! kinds to status codes.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Error classification consumed by the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ValidationFailed,
    ReferenceNotFound,
    Conflict,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::ReferenceNotFound => "reference_not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unknown => "unknown",
        }
    }
}

/// Entities managed by the service layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Book,
    User,
    LendBook,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Category => "Category",
            Entity::Book => "Book",
            Entity::User => "User",
            Entity::LendBook => "Lend book",
        })
    }
}

/// Structural rule violations detected by the validation middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("name is too short")]
    NameTooShort,
    #[error("description is required")]
    DescriptionRequired,
    #[error("description is too short")]
    DescriptionTooShort,
    #[error("category id is required")]
    CategoryRequired,
    #[error("book id is required")]
    BookIdRequired,
    #[error("user id is required")]
    UserIdRequired,
    #[error("loan start is required")]
    LoanStartRequired,
    #[error("loan end is required")]
    LoanEndRequired,
    #[error("email is invalid")]
    EmailInvalid,
}

impl ValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::NameRequired => "name_required",
            ValidationError::NameTooShort => "name_too_short",
            ValidationError::DescriptionRequired => "description_required",
            ValidationError::DescriptionTooShort => "description_too_short",
            ValidationError::CategoryRequired => "category_required",
            ValidationError::BookIdRequired => "book_id_required",
            ValidationError::UserIdRequired => "user_id_required",
            ValidationError::LoanStartRequired => "loan_start_required",
            ValidationError::LoanEndRequired => "loan_end_required",
            ValidationError::EmailInvalid => "email_invalid",
        }
    }
}

/// A referenced record that does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingReference {
    #[error("category does not exist")]
    Category,
    #[error("book does not exist")]
    Book,
    #[error("user does not exist")]
    User,
}

impl MissingReference {
    pub fn reason(&self) -> &'static str {
        match self {
            MissingReference::Category => "category_not_found",
            MissingReference::Book => "book_not_found",
            MissingReference::User => "user_not_found",
        }
    }
}

/// Uniqueness or exclusivity violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("name already exists")]
    NameAlreadyExists,
    #[error("book is already lent")]
    BookAlreadyLent,
}

impl ConflictError {
    pub fn reason(&self) -> &'static str {
        match self {
            ConflictError::NameAlreadyExists => "name_already_exists",
            ConflictError::BookAlreadyLent => "book_already_lent",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: Entity, id: Uuid },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(#[from] MissingReference),

    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(entity: Entity, id: Uuid) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::ValidationFailed,
            AppError::ReferenceNotFound(_) => ErrorKind::ReferenceNotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Database(_) => ErrorKind::Unknown,
        }
    }

    /// Stable sub-kind identifier, e.g. `book_already_lent`
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "record_not_found",
            AppError::Validation(v) => v.reason(),
            AppError::ReferenceNotFound(r) => r.reason(),
            AppError::Conflict(c) => c.reason(),
            AppError::Database(_) => "unknown_error",
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Name of the constraint a database error was raised for, if any
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) => db.constraint(),
        _ => None,
    }
}
