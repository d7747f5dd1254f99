//! Borrowing (loan) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Borrowing model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Borrowing {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
}

impl Borrowing {
    /// A borrowing is active until the book comes back
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Borrowing with computed flags for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowingDetails {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrow_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
    pub is_returned: bool,
    pub is_overdue: bool,
}

impl From<Borrowing> for BorrowingDetails {
    fn from(borrowing: Borrowing) -> Self {
        let today = Utc::now().date_naive();
        let is_returned = borrowing.return_date.is_some();
        Self {
            id: borrowing.id,
            book_id: borrowing.book_id,
            member_id: borrowing.member_id,
            borrow_date: borrowing.borrow_date,
            due_date: borrowing.due_date,
            return_date: borrowing.return_date,
            is_returned,
            is_overdue: !is_returned && borrowing.due_date < today,
        }
    }
}

/// Create borrowing request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBorrowing {
    #[validate(range(min = 1, message = "Book ID must be a positive integer"))]
    pub book_id: i32,
    #[validate(range(min = 1, message = "Member ID must be a positive integer"))]
    pub member_id: i32,
    /// Due date; defaults to the configured loan period when omitted
    pub due_date: Option<NaiveDate>,
}

/// Return request identifying the active borrowing by book and member
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReturnBorrowing {
    #[validate(range(min = 1, message = "Book ID must be a positive integer"))]
    pub book_id: i32,
    #[validate(range(min = 1, message = "Member ID must be a positive integer"))]
    pub member_id: i32,
}
