//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, BookStatus, CreateBook, UpdateBook},
    AppState,
};

/// Book list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Exact book name
    pub name: Option<String>,
    /// "0" for available books, any other value for books on loan
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// List books, optionally filtered by name and/or availability
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Book list", body = BooksResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BooksResponse>> {
    let service = &state.services.books;
    let name = query.name.as_deref().filter(|name| !name.is_empty());
    let status = query
        .status
        .as_deref()
        .filter(|status| !status.is_empty())
        .map(BookStatus::from);

    let books = match (name, status) {
        (None, None) => service.find_all().await?,
        (Some(name), None) => service.find_by_name(name).await?,
        (None, Some(status)) => service.find_by_status(status).await?,
        (Some(name), Some(status)) => service.find_by_name_and_status(name, status).await?,
    };
    Ok(Json(BooksResponse { books }))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 404, description = "Book not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.find(id).await?;
    Ok(Json(BookResponse { book }))
}

/// Create book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid book", body = crate::api::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(data): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(BookResponse { book })))
}

/// Update book (fields left out are kept)
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid book", body = crate::api::ErrorResponse),
        (status = 404, description = "Book or category not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(BookResponse { book }))
}

/// Delete book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
