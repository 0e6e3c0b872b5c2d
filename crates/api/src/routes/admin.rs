//! Admin-only user management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    routes::auth::user_info,
};
use timekeep_core::auth::{hash_password, validate_credentials};
use timekeep_db::{UserRepository, entities::users, repositories::CreateUserInput};
use timekeep_shared::{auth::UserInfo, types::UserId};

/// Creates the admin routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}/toggle-admin", post(toggle_admin))
        .route("/admin/users/{id}", delete(delete_user))
}

/// Confirms against the store that the caller is still an admin.
///
/// Access tokens carry the admin flag for their lifetime; user management
/// re-reads it so demoted or deleted admins lose access immediately.
async fn verify_admin(state: &AppState, auth: &AuthUser) -> ApiResult<()> {
    let current = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?;
    ensure_still_admin(current.as_ref())
}

fn ensure_still_admin(user: Option<&users::Model>) -> ApiResult<()> {
    match user {
        None => Err(ApiError::unauthorized("User no longer exists")),
        Some(user) if !user.is_admin => Err(ApiError::forbidden("Admin access required")),
        Some(_) => Ok(()),
    }
}

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Grant admin access.
    #[serde(default)]
    pub is_admin: bool,
}

/// GET /admin/users
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserInfo>>> {
    auth.require_admin()?;
    verify_admin(&state, &auth).await?;

    let users = UserRepository::new((*state.db).clone()).list().await?;
    Ok(Json(users.iter().map(user_info).collect()))
}

/// POST /admin/users
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<impl IntoResponse> {
    auth.require_admin()?;
    validate_credentials(&payload.username, &payload.email, &payload.password)?;
    verify_admin(&state, &auth).await?;

    let password_hash = hash_password(&payload.password)?;
    let user = UserRepository::new((*state.db).clone())
        .create(CreateUserInput {
            username: payload.username,
            email: payload.email,
            password_hash,
            is_admin: payload.is_admin,
        })
        .await?;

    info!(admin_id = %auth.user_id(), user_id = %user.id, "User created by admin");
    Ok((StatusCode::CREATED, Json(user_info(&user))))
}

/// POST /admin/users/{id}/toggle-admin
async fn toggle_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> ApiResult<Json<UserInfo>> {
    auth.require_admin()?;
    if id == auth.user_id() {
        return Err(ApiError::forbidden("Cannot change your own admin status"));
    }
    verify_admin(&state, &auth).await?;

    let repo = UserRepository::new((*state.db).clone());
    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {id}")))?;
    let user = repo.set_admin(id, !user.is_admin).await?;

    info!(admin_id = %auth.user_id(), user_id = %id, is_admin = user.is_admin, "Admin flag toggled");
    Ok(Json(user_info(&user)))
}

/// DELETE /admin/users/{id}
///
/// Removes the user together with their projects, entries, leave and targets.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> ApiResult<StatusCode> {
    auth.require_admin()?;
    if id == auth.user_id() {
        return Err(ApiError::forbidden("Cannot delete your own account"));
    }
    verify_admin(&state, &auth).await?;

    UserRepository::new((*state.db).clone()).delete(id).await?;

    info!(admin_id = %auth.user_id(), user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
