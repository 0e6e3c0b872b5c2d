//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod admin;
pub mod auth;
pub mod health;
pub mod holidays;
pub mod leave;
pub mod months;
pub mod projects;
pub mod reports;
pub mod targets;
pub mod time_entries;

/// Creates the public API router.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes()).merge(auth::routes())
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(holidays::routes())
        .merge(months::routes())
        .merge(time_entries::routes())
        .merge(projects::routes())
        .merge(leave::routes())
        .merge(targets::routes())
        .merge(reports::routes())
        .merge(admin::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    api_routes().merge(protected_routes)
}
