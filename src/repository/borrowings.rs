//! Borrowings repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::borrowing::Borrowing,
};

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrowing by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrowing> {
        sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowing with ID {} not found", id)))
    }

    /// Insert a new borrowing
    pub async fn create(
        &self,
        book_id: i32,
        member_id: i32,
        due_date: NaiveDate,
    ) -> AppResult<Borrowing> {
        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            INSERT INTO borrowings (book_id, member_id, borrow_date, due_date)
            VALUES ($1, $2, NOW(), $3)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(borrowing)
    }

    /// Find the active borrowing for a book, if any
    pub async fn find_active_by_book(&self, book_id: i32) -> AppResult<Option<Borrowing>> {
        let borrowing = sqlx::query_as::<_, Borrowing>(
            "SELECT * FROM borrowings WHERE book_id = $1 AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(borrowing)
    }

    /// Find the active borrowing for a book/member pair, if any
    pub async fn find_active_by_book_and_member(
        &self,
        book_id: i32,
        member_id: i32,
    ) -> AppResult<Option<Borrowing>> {
        let borrowing = sqlx::query_as::<_, Borrowing>(
            r#"
            SELECT * FROM borrowings
            WHERE book_id = $1 AND member_id = $2 AND return_date IS NULL
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(borrowing)
    }

    /// Count open borrowings held by a member
    pub async fn count_active_by_member(&self, member_id: i32) -> AppResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM borrowings WHERE member_id = $1 AND return_date IS NULL",
        )
        .bind(member_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("count"))
    }

    /// Count open borrowings of a book
    pub async fn count_active_by_book(&self, book_id: i32) -> AppResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM borrowings WHERE book_id = $1 AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("count"))
    }

    /// List all active (unreturned) borrowings
    pub async fn list_active(&self) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            "SELECT * FROM borrowings WHERE return_date IS NULL ORDER BY borrow_date",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    /// List every borrowing of a member, open and returned
    pub async fn list_by_member(&self, member_id: i32) -> AppResult<Vec<Borrowing>> {
        let borrowings = sqlx::query_as::<_, Borrowing>(
            "SELECT * FROM borrowings WHERE member_id = $1 ORDER BY borrow_date",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowings)
    }

    /// Mark a borrowing as returned
    pub async fn mark_returned(&self, id: i32) -> AppResult<Borrowing> {
        sqlx::query_as::<_, Borrowing>(
            r#"
            UPDATE borrowings
            SET return_date = NOW()
            WHERE id = $1 AND return_date IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrowing with ID {} not found", id)))
    }
}
