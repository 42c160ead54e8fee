//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::provided_text;

/// User record (borrower)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create user request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
}

/// Update user request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

impl CreateUser {
    pub fn email(&self) -> Option<&str> {
        provided_text(&self.email)
    }
}

impl UpdateUser {
    pub fn name(&self) -> Option<&str> {
        provided_text(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        provided_text(&self.email)
    }
}

impl User {
    /// Merge the provided fields of `update`; returns false when nothing was provided
    pub fn apply(&mut self, update: &UpdateUser) -> bool {
        let mut changed = false;
        if let Some(name) = update.name() {
            self.name = name.to_string();
            changed = true;
        }
        if let Some(email) = update.email() {
            self.email = Some(email.to_string());
            changed = true;
        }
        changed
    }
}
