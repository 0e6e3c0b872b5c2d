//! Authentication routes for first-user registration, login, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};
use timekeep_core::auth::{hash_password, validate_credentials, verify_password};
use timekeep_db::{UserRepository, entities::users, repositories::CreateUserInput};
use timekeep_shared::{
    TokenPair,
    auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo},
    types::UserId,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

/// Converts a stored user into the public user info.
pub(crate) fn user_info(user: &users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        is_admin: user.is_admin,
    }
}

fn issue_tokens(state: &AppState, user: &users::Model) -> ApiResult<TokenPair> {
    Ok(state
        .jwt_service
        .issue_pair(user.id, &user.username, user.is_admin)?)
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_username(&payload.username).await? else {
        info!(username = %payload.username, "Login attempt for non-existent user");
        return Err(ApiError::unauthorized("Invalid username or password"));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let tokens = issue_tokens(&state, &user)?;
    info!(user_id = %user.id, "User logged in successfully");

    Ok(Json(LoginResponse {
        user: user_info(&user),
        tokens,
    }))
}

/// POST /auth/register - Create the first account, which becomes admin.
///
/// Closed as soon as any user exists; later accounts are created by an admin.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_credentials(&payload.username, &payload.email, &payload.password)?;

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.count().await? > 0 {
        return Err(registration_closed());
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create_first_admin(CreateUserInput {
            username: payload.username,
            email: payload.email,
            password_hash,
            is_admin: true,
        })
        .await?
        .ok_or_else(registration_closed)?;

    let tokens = issue_tokens(&state, &user)?;
    info!(user_id = %user.id, username = %user.username, "First user registered as admin");

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            user: user_info(&user),
            tokens,
        }),
    ))
}

fn registration_closed() -> ApiError {
    ApiError::forbidden("Registration is closed; ask an administrator for an account")
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
///
/// The user is reloaded so that deleted users and changed admin flags take
/// effect.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<impl IntoResponse> {
    let claims = state
        .jwt_service
        .validate_refresh_token(&payload.refresh_token)?;

    let user = UserRepository::new((*state.db).clone())
        .find_by_id(UserId::from_uuid(claims.user_id()))
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(Json(issue_tokens(&state, &user)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    use crate::test_support::{access_token, json_body, send, test_state};

    #[tokio::test]
    async fn test_register_rejects_short_password_before_store() {
        let state = test_state();
        let app = routes().with_state(state);

        let response = send(
            app,
            "POST",
            "/auth/register",
            None,
            Some(r#"{"username":"anna","email":"anna@example.se","password":"short"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = routes().with_state(state);

        let body = format!(r#"{{"refresh_token":"{token}"}}"#);
        let response = send(app, "POST", "/auth/refresh", None, Some(&body)).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let app = routes().with_state(test_state());

        let response = send(
            app,
            "POST",
            "/auth/refresh",
            None,
            Some(r#"{"refresh_token":"not-a-jwt"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["error"], "unauthorized");
    }
}
