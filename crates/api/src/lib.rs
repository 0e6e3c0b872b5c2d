//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for time entries, leave, projects, targets and reports
//! - Authentication middleware
//! - Error to response mapping
//! - Display helpers for the month view

pub mod error;
pub mod middleware;
pub mod presentation;
pub mod routes;
pub mod timesheet;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    BoxError, Json, Router, error_handling::HandleErrorLayer, http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use timekeep_core::{calendar::HolidayCalendar, workday::WorkdayCalculator};
use timekeep_shared::JwtService;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Day classification with the configured hours per day.
    pub calculator: WorkdayCalculator,
    /// Public holiday source.
    pub calendar: Arc<dyn HolidayCalendar>,
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn handle_timeout(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({
                "error": "timeout",
                "message": "Request took too long"
            })),
        )
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An internal error occurred"
            })),
        )
    }
}
