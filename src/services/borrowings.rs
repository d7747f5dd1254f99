//! Borrowing (lending) service

use chrono::{Duration, Utc};
use validator::Validate;

use crate::{
    config::BorrowingConfig,
    error::{AppError, AppResult},
    models::borrowing::{BorrowingDetails, CreateBorrowing, ReturnBorrowing},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowingsService {
    repository: Repository,
    config: BorrowingConfig,
}

impl BorrowingsService {
    pub fn new(repository: Repository, config: BorrowingConfig) -> Self {
        Self { repository, config }
    }

    /// Borrow a book for a member.
    ///
    /// The book and member must exist, the book must not currently be out,
    /// and the member must be under the configured borrowing limit.
    pub async fn create_borrowing(&self, request: CreateBorrowing) -> AppResult<BorrowingDetails> {
        request.validate()?;

        self.repository.books.get_by_id(request.book_id).await?;
        self.repository.members.get_by_id(request.member_id).await?;

        if let Some(active) = self
            .repository
            .borrowings
            .find_active_by_book(request.book_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Book with ID {} is already borrowed by member {}",
                request.book_id, active.member_id
            )));
        }

        let open = self
            .repository
            .borrowings
            .count_active_by_member(request.member_id)
            .await?;
        if open >= self.config.max_per_member {
            return Err(AppError::OperationNotAllowed(format!(
                "Member {} has reached borrowing limit ({}/{})",
                request.member_id, open, self.config.max_per_member
            )));
        }

        let due_date = request.due_date.unwrap_or_else(|| {
            Utc::now().date_naive() + Duration::days(self.config.loan_period_days)
        });

        tracing::info!(
            book_id = request.book_id,
            member_id = request.member_id,
            %due_date,
            "Creating borrowing"
        );
        let borrowing = self
            .repository
            .borrowings
            .create(request.book_id, request.member_id, due_date)
            .await?;
        Ok(borrowing.into())
    }

    /// Return a borrowed book, identified by book and member
    pub async fn return_book(&self, request: ReturnBorrowing) -> AppResult<BorrowingDetails> {
        request.validate()?;

        let borrowing = self
            .repository
            .borrowings
            .find_active_by_book_and_member(request.book_id, request.member_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(
                    "No active borrowing found for this book and member".to_string(),
                )
            })?;

        tracing::info!(borrowing_id = borrowing.id, "Returning book");
        let returned = self.repository.borrowings.mark_returned(borrowing.id).await?;
        Ok(returned.into())
    }

    /// List all active borrowings
    pub async fn list_active(&self) -> AppResult<Vec<BorrowingDetails>> {
        let borrowings = self.repository.borrowings.list_active().await?;
        Ok(borrowings.into_iter().map(Into::into).collect())
    }

    /// List a member's borrowings, open and returned
    pub async fn member_borrowings(&self, member_id: i32) -> AppResult<Vec<BorrowingDetails>> {
        // Verify member exists
        self.repository.members.get_by_id(member_id).await?;

        let borrowings = self.repository.borrowings.list_by_member(member_id).await?;
        Ok(borrowings.into_iter().map(Into::into).collect())
    }
}
