//! Book model and related types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{provided_id, provided_text};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub author: String,
    pub description: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
///
/// Missing fields deserialize to empty values so that the validation layer,
/// not the decoder, reports what is wrong.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBook {
    pub name: String,
    pub author: String,
    pub description: String,
    pub category_id: Uuid,
}

/// Update book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

impl UpdateBook {
    pub fn name(&self) -> Option<&str> {
        provided_text(&self.name)
    }

    pub fn author(&self) -> Option<&str> {
        provided_text(&self.author)
    }

    pub fn description(&self) -> Option<&str> {
        provided_text(&self.description)
    }

    pub fn category_id(&self) -> Option<Uuid> {
        provided_id(self.category_id)
    }
}

impl Book {
    /// Merge the provided fields of `update`; returns false when nothing was provided
    pub fn apply(&mut self, update: &UpdateBook) -> bool {
        let mut changed = false;
        if let Some(name) = update.name() {
            self.name = name.to_string();
            changed = true;
        }
        if let Some(author) = update.author() {
            self.author = author.to_string();
            changed = true;
        }
        if let Some(description) = update.description() {
            self.description = description.to_string();
            changed = true;
        }
        if let Some(category_id) = update.category_id() {
            self.category_id = category_id;
            changed = true;
        }
        changed
    }
}

/// Availability of a book, derived from the loan table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    /// No loan row exists for the book (wire value "0")
    Available,
    /// The book has a loan row (any other wire value)
    Lent,
}

impl From<&str> for BookStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "0" => BookStatus::Available,
            _ => BookStatus::Lent,
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => f.write_str("0"),
            BookStatus::Lent => f.write_str("1"),
        }
    }
}
