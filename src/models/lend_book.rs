//! Lend book (loan) model
//!
//! A row in `lend_books` is an active loan: its presence makes the book
//! unavailable, and deleting it returns the book.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::provided_id;

/// Loan record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LendBook {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    /// Loan start
    #[sqlx(rename = "loan_from")]
    pub from: DateTime<Utc>,
    /// Loan end
    #[sqlx(rename = "loan_to")]
    pub to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create loan request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateLendBook {
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Update loan request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateLendBook {
    pub book_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl UpdateLendBook {
    pub fn book_id(&self) -> Option<Uuid> {
        provided_id(self.book_id)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        provided_id(self.user_id)
    }
}

impl LendBook {
    /// Book the loan would move to, if the update changes it
    pub fn moved_book(&self, update: &UpdateLendBook) -> Option<Uuid> {
        update.book_id().filter(|id| *id != self.book_id)
    }

    /// Borrower the loan would move to, if the update changes it
    pub fn moved_user(&self, update: &UpdateLendBook) -> Option<Uuid> {
        update.user_id().filter(|id| *id != self.user_id)
    }

    /// Merge the provided fields of `update`; returns false when nothing was provided
    pub fn apply(&mut self, update: &UpdateLendBook) -> bool {
        let mut changed = false;
        if let Some(book_id) = update.book_id() {
            self.book_id = book_id;
            changed = true;
        }
        if let Some(user_id) = update.user_id() {
            self.user_id = user_id;
            changed = true;
        }
        if let Some(from) = update.from {
            self.from = from;
            changed = true;
        }
        if let Some(to) = update.to {
            self.to = to;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn loan() -> LendBook {
        let now = Utc::now();
        LendBook {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            from: now,
            to: now + Duration::days(21),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_moved_book_ignores_same_and_nil() {
        let loan = loan();
        let same = UpdateLendBook {
            book_id: Some(loan.book_id),
            ..Default::default()
        };
        let nil = UpdateLendBook {
            book_id: Some(Uuid::nil()),
            ..Default::default()
        };
        let other = Uuid::new_v4();
        let moved = UpdateLendBook {
            book_id: Some(other),
            ..Default::default()
        };

        assert_eq!(loan.moved_book(&same), None);
        assert_eq!(loan.moved_book(&nil), None);
        assert_eq!(loan.moved_book(&moved), Some(other));
    }

    #[test]
    fn test_apply_period() {
        let original = loan();
        let mut loan = original.clone();
        let to = original.to + Duration::days(7);

        assert!(loan.apply(&UpdateLendBook {
            to: Some(to),
            ..Default::default()
        }));
        assert_eq!(loan.to, to);
        assert_eq!(loan.from, original.from);
        assert_eq!(loan.book_id, original.book_id);
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let original = loan();
        let mut loan = original.clone();
        assert!(!loan.apply(&UpdateLendBook::default()));
        assert_eq!(loan, original);
    }
}
