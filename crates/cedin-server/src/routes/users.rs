//! User Routes - Staff account management
//!
//! HTTP handlers that delegate to UserService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::application::UserChanges;
use crate::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::AppState;

use super::{error_response, not_found};

/// List all Users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of all Users", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "User"
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, (StatusCode, String)> {
    let users = state
        .user_service
        .list_all()
        .await
        .map_err(error_response)?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Create new User
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid user data"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "User"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), (StatusCode, String)> {
    let user = state
        .user_service
        .create(payload.username, payload.email, &payload.password, payload.role)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json((user, None).into())))
}

/// Get User by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, (StatusCode, String)> {
    let found = state
        .user_service
        .get_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| not_found("User"))?;

    Ok(Json(found.into()))
}

/// Update User
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "User"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, (StatusCode, String)> {
    let changes = UserChanges {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        role: payload.role,
        is_active: payload.is_active,
    };
    let updated = state
        .user_service
        .update(id, changes)
        .await
        .map_err(error_response)?;

    Ok(Json(updated.into()))
}

/// Delete User
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted; a linked professional is unlinked"),
        (status = 404, description = "User not found")
    ),
    tag = "User"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let deleted = state
        .user_service
        .delete(id)
        .await
        .map_err(error_response)?;

    if !deleted {
        return Err(not_found("User"));
    }

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "User deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}
