//! User endpoints

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
    models::user::{CreateUser, UpdateUser, User},
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "User list", body = UsersResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let users = state.services.users.find_all().await?;
    Ok(Json(UsersResponse { users }))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.find(id).await?;
    Ok(Json(UserResponse { user }))
}

/// Create user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid user", body = crate::api::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.create(&data).await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Update user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.update(id, &data).await?;
    Ok(Json(UserResponse { user }))
}

/// Delete user and end their loans
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::api::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::api::test_support::{send, Mocks};

    #[tokio::test]
    async fn test_create_user_returns_created() {
        let mut mocks = Mocks::default();
        mocks
            .users
            .expect_create()
            .withf(|data: &CreateUser| data.name == "Ada" && data.email() == Some("ada@example.com"))
            .times(1)
            .returning(|data| {
                let now = Utc::now();
                Ok(User {
                    id: Uuid::new_v4(),
                    name: data.name.clone(),
                    email: data.email.clone(),
                    created_at: now,
                    updated_at: now,
                })
            });

        let (status, body) = send(
            mocks.into_router(),
            Method::POST,
            "/api/v1/users",
            Some(json!({ "name": "Ada", "email": "ada@example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_delete_user_returns_no_content() {
        let mut mocks = Mocks::default();
        mocks.users.expect_delete().times(1).returning(|_| Ok(()));

        let (status, body) = send(
            mocks.into_router(),
            Method::DELETE,
            &format!("/api/v1/users/{}", Uuid::new_v4()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
    }
}
