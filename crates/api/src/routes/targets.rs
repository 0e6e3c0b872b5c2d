//! Monthly project targets and their comparison with reported hours.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiResult, middleware::AuthUser, timesheet::load_months};
use timekeep_core::{
    calendar::Month,
    reports::{ReportService, TargetComparison},
};
use timekeep_db::{
    ProjectTargetRepository, entities::project_targets, repositories::to_project_target,
};
use timekeep_shared::types::{ProjectId, ProjectTargetId};

/// Creates the target routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/targets/{year}/{month}", get(list_targets).put(upsert_target))
        .route("/targets/{id}", delete(delete_target))
}

/// Request body for setting a target.
#[derive(Debug, Deserialize)]
pub struct UpsertTargetRequest {
    /// Project the target applies to.
    pub project_id: ProjectId,
    /// Share of the month's required hours, 0-100.
    pub percentage: Decimal,
}

/// A stored target.
#[derive(Debug, Serialize)]
pub struct TargetResponse {
    /// Target ID.
    pub id: Uuid,
    /// Project.
    pub project_id: Uuid,
    /// Target percentage.
    pub percentage: Decimal,
}

impl From<&project_targets::Model> for TargetResponse {
    fn from(model: &project_targets::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            percentage: model.target_percentage,
        }
    }
}

/// Targets of a month compared with what was reported.
#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    /// The month.
    pub month: Month,
    /// Required hours the percentages apply to.
    pub required_hours: Decimal,
    /// Stored targets.
    pub targets: Vec<TargetResponse>,
    /// Per project comparison, targeted projects and projects with hours.
    pub comparison: Vec<TargetComparison>,
}

/// GET /targets/{year}/{month}
async fn list_targets(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Json<TargetsResponse>> {
    let month = Month::new(year, month)?;
    let user_id = auth.user_id();

    let rows = ProjectTargetRepository::new((*state.db).clone())
        .list_for_month(user_id, month)
        .await?;
    let targets = rows
        .iter()
        .map(to_project_target)
        .collect::<Result<Vec<_>, _>>()?;

    let loaded = load_months(&state, user_id, &[month]).await?;
    let (required_hours, comparison) = loaded.months.first().map_or_else(
        || (Decimal::ZERO, Vec::new()),
        |m| {
            (
                m.aggregate.total_required,
                ReportService::target_comparison(&m.aggregate, &targets),
            )
        },
    );

    Ok(Json(TargetsResponse {
        month,
        required_hours,
        targets: rows.iter().map(TargetResponse::from).collect(),
        comparison,
    }))
}

/// PUT /targets/{year}/{month}
async fn upsert_target(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
    Json(payload): Json<UpsertTargetRequest>,
) -> ApiResult<Json<TargetResponse>> {
    let month = Month::new(year, month)?;

    let target = ProjectTargetRepository::new((*state.db).clone())
        .upsert(auth.user_id(), payload.project_id, month, payload.percentage)
        .await?;

    info!(
        user_id = %auth.user_id(),
        project_id = %payload.project_id,
        month = %month,
        percentage = %payload.percentage,
        "Project target set"
    );
    Ok(Json(TargetResponse::from(&target)))
}

/// DELETE /targets/{id}
async fn delete_target(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectTargetId>,
) -> ApiResult<StatusCode> {
    ProjectTargetRepository::new((*state.db).clone())
        .delete(auth.user_id(), id)
        .await?;

    info!(user_id = %auth.user_id(), target_id = %id, "Project target deleted");
    Ok(StatusCode::NO_CONTENT)
}
