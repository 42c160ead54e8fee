//! Category model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::provided_text;

/// Category record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    /// Unique category name
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create category request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateCategory {
    #[serde(default)]
    pub name: String,
}

/// Update category request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub name: Option<String>,
}

impl UpdateCategory {
    pub fn name(&self) -> Option<&str> {
        provided_text(&self.name)
    }
}

impl Category {
    /// Merge the provided fields of `update`; returns false when nothing was provided
    pub fn apply(&mut self, update: &UpdateCategory) -> bool {
        match update.name() {
            Some(name) => {
                self.name = name.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fictions() -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: "Fictions".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_name() {
        let mut category = fictions();
        let changed = category.apply(&UpdateCategory {
            name: Some("Biographies".to_string()),
        });
        assert!(changed);
        assert_eq!(category.name, "Biographies");
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let original = fictions();
        let mut category = original.clone();
        assert!(!category.apply(&UpdateCategory::default()));
        assert!(!category.apply(&UpdateCategory {
            name: Some(String::new()),
        }));
        assert_eq!(category, original);
    }
}
