//! Category endpoints

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
    models::category::{Category, CreateCategory, UpdateCategory},
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    pub category: Category,
}

#[derive(Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Category list", body = CategoriesResponse)
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let categories = state.services.categories.find_all().await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.find(id).await?;
    Ok(Json(CategoryResponse { category }))
}

/// Create category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid name", body = crate::api::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::api::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(data): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state.services.categories.create(&data).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// Update category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found", body = crate::api::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::api::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateCategory>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.update(id, &data).await?;
    Ok(Json(CategoryResponse { category }))
}

/// Delete category and every book in it
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::{
        api::test_support::{send, Mocks},
        error::ConflictError,
    };

    #[tokio::test]
    async fn test_create_returns_created() {
        let mut mocks = Mocks::default();
        mocks.categories.expect_create().times(1).returning(|data| {
            let now = Utc::now();
            Ok(Category {
                id: Uuid::new_v4(),
                name: data.name.clone(),
                created_at: now,
                updated_at: now,
            })
        });

        let (status, body) = send(
            mocks.into_router(),
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "name": "Fictions" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["category"]["name"], "Fictions");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let mut mocks = Mocks::default();
        mocks
            .categories
            .expect_create()
            .returning(|_| Err(ConflictError::NameAlreadyExists.into()));

        let (status, body) = send(
            mocks.into_router(),
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "name": "Fictions" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["code"], "name_already_exists");
    }

    #[tokio::test]
    async fn test_delete_returns_no_content() {
        let id = Uuid::new_v4();
        let mut mocks = Mocks::default();
        mocks
            .categories
            .expect_delete()
            .withf(move |got| *got == id)
            .times(1)
            .returning(|_| Ok(()));

        let (status, _) = send(
            mocks.into_router(),
            Method::DELETE,
            &format!("/api/v1/categories/{id}"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
