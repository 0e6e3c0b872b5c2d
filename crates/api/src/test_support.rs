//! Helpers for route tests.
//!
//! The database connection is disconnected; only requests that are rejected
//! before touching the store can be exercised.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, header::AUTHORIZATION},
    middleware::from_fn_with_state,
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

use timekeep_core::{calendar::SwedishCalendar, workday::WorkdayCalculator};
use timekeep_shared::{JwtConfig, JwtService};

use crate::{AppState, middleware::auth::auth_middleware};

pub fn test_state() -> AppState {
    AppState {
        db: Arc::new(DatabaseConnection::default()),
        jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
        calculator: WorkdayCalculator::default(),
        calendar: Arc::new(SwedishCalendar),
    }
}

/// Wraps `routes` in the auth middleware the way the real router does.
pub fn protected(routes: Router<AppState>, state: &AppState) -> Router {
    Router::new()
        .merge(routes)
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state.clone())
}

pub fn access_token(state: &AppState, user_id: Uuid, admin: bool) -> String {
    state
        .jwt_service
        .generate_access_token(user_id, "tester", admin)
        .expect("should generate token")
}

pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
