//! Vacation and sick leave routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiResult, middleware::AuthUser};
use timekeep_core::workday::{LeavePeriod, LeaveType, merge_leave_periods};
use timekeep_db::{
    LeaveRepository,
    entities::leave_periods,
    repositories::{CreateLeaveInput, to_leave_period},
};
use timekeep_shared::types::LeavePeriodId;

/// Creates the leave routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave", get(list_leave).post(create_leave))
        .route("/leave/{id}", delete(delete_leave))
}

/// Request body for registering leave.
#[derive(Debug, Deserialize)]
pub struct CreateLeaveRequest {
    /// `vacation` or `sick`.
    pub leave_type: LeaveType,
    /// First day (YYYY-MM-DD).
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Optional note.
    #[serde(default)]
    pub description: Option<String>,
}

/// A stored leave period.
#[derive(Debug, Serialize)]
pub struct LeaveResponse {
    /// Leave period ID.
    pub id: Uuid,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Calendar days covered.
    pub days: i64,
    /// Note.
    pub description: Option<String>,
}

impl From<leave_periods::Model> for LeaveResponse {
    fn from(model: leave_periods::Model) -> Self {
        let days = (model.end_date - model.start_date).num_days() + 1;
        Self {
            id: model.id,
            leave_type: model.leave_type.into(),
            start_date: model.start_date,
            end_date: model.end_date,
            days,
            description: model.description,
        }
    }
}

/// All leave plus overlapping and adjacent periods merged for display.
#[derive(Debug, Serialize)]
pub struct LeaveListResponse {
    /// Stored periods, most recent first.
    pub periods: Vec<LeaveResponse>,
    /// Merged view, by start date.
    pub merged: Vec<LeavePeriod>,
}

/// GET /leave
async fn list_leave(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<LeaveListResponse>> {
    let rows = LeaveRepository::new((*state.db).clone())
        .list(auth.user_id())
        .await?;

    let periods = rows
        .iter()
        .map(to_leave_period)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(LeaveListResponse {
        merged: merge_leave_periods(&periods),
        periods: rows.into_iter().map(LeaveResponse::from).collect(),
    }))
}

/// POST /leave
async fn create_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateLeaveRequest>,
) -> ApiResult<impl IntoResponse> {
    let period = LeaveRepository::new((*state.db).clone())
        .create(
            auth.user_id(),
            CreateLeaveInput {
                leave_type: payload.leave_type,
                start_date: payload.start_date,
                end_date: payload.end_date,
                description: payload.description,
            },
        )
        .await?;

    info!(
        user_id = %auth.user_id(),
        leave_id = %period.id,
        start = %period.start_date,
        end = %period.end_date,
        "Leave registered"
    );
    Ok((StatusCode::CREATED, Json(LeaveResponse::from(period))))
}

/// DELETE /leave/{id}
async fn delete_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<LeavePeriodId>,
) -> ApiResult<StatusCode> {
    LeaveRepository::new((*state.db).clone())
        .delete(auth.user_id(), id)
        .await?;

    info!(user_id = %auth.user_id(), leave_id = %id, "Leave deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::{access_token, json_body, protected, send, test_state};

    #[tokio::test]
    async fn test_reversed_period_is_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "POST",
            "/leave",
            Some(&token),
            Some(r#"{"leave_type":"vacation","start_date":"2026-07-10","end_date":"2026-07-06"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_unknown_leave_type_is_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "POST",
            "/leave",
            Some(&token),
            Some(r#"{"leave_type":"parental","start_date":"2026-07-06","end_date":"2026-07-10"}"#),
        )
        .await;

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_leave_before_gregorian_calendar_is_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "POST",
            "/leave",
            Some(&token),
            Some(r#"{"leave_type":"vacation","start_date":"1582-10-01","end_date":"1582-10-03"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }
}
