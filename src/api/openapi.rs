//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, categories, health, lend_books, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending API",
        version = "1.0.0",
        description = "Book lending service REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Loans
        lend_books::list_lend_books,
        lend_books::get_lend_book,
        lend_books::create_lend_book,
        lend_books::update_lend_book,
        lend_books::delete_lend_book,
    ),
    components(
        schemas(
            // Categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            categories::CategoryResponse,
            categories::CategoriesResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookResponse,
            books::BooksResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            users::UserResponse,
            users::UsersResponse,
            // Loans
            crate::models::lend_book::LendBook,
            crate::models::lend_book::CreateLendBook,
            crate::models::lend_book::UpdateLendBook,
            lend_books::LendBookResponse,
            lend_books::LendBooksResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::api::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categories", description = "Book categories"),
        (name = "books", description = "Book catalog"),
        (name = "users", description = "Borrowers"),
        (name = "lend-books", description = "Active loans")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
