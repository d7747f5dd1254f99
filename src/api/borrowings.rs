//! Borrowing endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrowing::{BorrowingDetails, CreateBorrowing, ReturnBorrowing},
};

/// List all active borrowings
#[utoipa::path(
    get,
    path = "/borrowings",
    tag = "borrowings",
    responses(
        (status = 200, description = "Active borrowings", body = Vec<BorrowingDetails>)
    )
)]
pub async fn list_borrowings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    let borrowings = state.services.borrowings.list_active().await?;
    Ok(Json(borrowings))
}

/// Borrow a book for a member
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "borrowings",
    request_body = CreateBorrowing,
    responses(
        (status = 201, description = "Borrowing created", body = BorrowingDetails),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book or member not found"),
        (status = 409, description = "Book already borrowed"),
        (status = 422, description = "Borrowing limit reached")
    )
)]
pub async fn create_borrowing(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBorrowing>,
) -> AppResult<(StatusCode, Json<BorrowingDetails>)> {
    let borrowing = state.services.borrowings.create_borrowing(request).await?;
    Ok((StatusCode::CREATED, Json(borrowing)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrowings/return",
    tag = "borrowings",
    request_body = ReturnBorrowing,
    responses(
        (status = 200, description = "Book returned", body = BorrowingDetails),
        (status = 404, description = "No active borrowing for this book and member")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnBorrowing>,
) -> AppResult<Json<BorrowingDetails>> {
    let borrowing = state.services.borrowings.return_book(request).await?;
    Ok(Json(borrowing))
}

/// Get a member's borrowings, open and returned
#[utoipa::path(
    get,
    path = "/borrowings/member/{member_id}",
    tag = "borrowings",
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member's borrowings", body = Vec<BorrowingDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn member_borrowings(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i32>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    let borrowings = state
        .services
        .borrowings
        .member_borrowings(member_id)
        .await?;
    Ok(Json(borrowings))
}
