//! Lend book (loan) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::lend_book::{CreateLendBook, LendBook, UpdateLendBook},
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct LendBookResponse {
    pub lend_book: LendBook,
}

#[derive(Serialize, ToSchema)]
pub struct LendBooksResponse {
    pub lend_books: Vec<LendBook>,
}

/// List all active loans
#[utoipa::path(
    get,
    path = "/lend-books",
    tag = "lend-books",
    responses(
        (status = 200, description = "Loan list", body = LendBooksResponse)
    )
)]
pub async fn list_lend_books(State(state): State<AppState>) -> AppResult<Json<LendBooksResponse>> {
    let lend_books = state.services.lend_books.find_all().await?;
    Ok(Json(LendBooksResponse { lend_books }))
}

/// Get loan by ID
#[utoipa::path(
    get,
    path = "/lend-books/{id}",
    tag = "lend-books",
    params(("id" = Uuid, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan details", body = LendBookResponse),
        (status = 404, description = "Loan not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn get_lend_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LendBookResponse>> {
    let lend_book = state.services.lend_books.find(id).await?;
    Ok(Json(LendBookResponse { lend_book }))
}

/// Lend a book
#[utoipa::path(
    post,
    path = "/lend-books",
    tag = "lend-books",
    request_body = CreateLendBook,
    responses(
        (status = 201, description = "Book lent", body = LendBookResponse),
        (status = 400, description = "Incomplete loan", body = crate::api::ErrorResponse),
        (status = 404, description = "Book or user not found", body = crate::api::ErrorResponse),
        (status = 409, description = "Book already lent", body = crate::api::ErrorResponse)
    )
)]
pub async fn create_lend_book(
    State(state): State<AppState>,
    Json(data): Json<CreateLendBook>,
) -> AppResult<(StatusCode, Json<LendBookResponse>)> {
    let lend_book = state.services.lend_books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(LendBookResponse { lend_book })))
}

/// Update loan
#[utoipa::path(
    put,
    path = "/lend-books/{id}",
    tag = "lend-books",
    params(("id" = Uuid, Path, description = "Loan ID")),
    request_body = UpdateLendBook,
    responses(
        (status = 200, description = "Loan updated", body = LendBookResponse),
        (status = 404, description = "Loan, book or user not found", body = crate::api::ErrorResponse),
        (status = 409, description = "Book already lent", body = crate::api::ErrorResponse)
    )
)]
pub async fn update_lend_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateLendBook>,
) -> AppResult<Json<LendBookResponse>> {
    let lend_book = state.services.lend_books.update(id, &data).await?;
    Ok(Json(LendBookResponse { lend_book }))
}

/// Return a book (delete its loan)
#[utoipa::path(
    delete,
    path = "/lend-books/{id}",
    tag = "lend-books",
    params(("id" = Uuid, Path, description = "Loan ID")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn delete_lend_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.lend_books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
