//! Project management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiResult, middleware::AuthUser};
use timekeep_db::{ProjectRepository, entities::projects, repositories::CreateProjectInput};
use timekeep_shared::types::ProjectId;

/// Creates the project routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}/toggle", post(toggle_project))
        .route("/projects/{id}", delete(delete_project))
}

/// Query parameters for listing projects.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    /// Only active projects.
    #[serde(default)]
    pub active: bool,
}

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name, unique per user.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response for a project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Whether new hours may be reported.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
}

impl From<projects::Model> for ProjectResponse {
    fn from(model: projects::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// GET /projects
async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = ProjectRepository::new((*state.db).clone())
        .list(auth.user_id(), query.active)
        .await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// POST /projects
async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<impl IntoResponse> {
    let project = ProjectRepository::new((*state.db).clone())
        .create(
            auth.user_id(),
            CreateProjectInput {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    info!(user_id = %auth.user_id(), project_id = %project.id, "Project created");
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

/// POST /projects/{id}/toggle
async fn toggle_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = ProjectRepository::new((*state.db).clone())
        .toggle_active(auth.user_id(), id)
        .await?;

    info!(user_id = %auth.user_id(), project_id = %id, active = project.is_active, "Project toggled");
    Ok(Json(ProjectResponse::from(project)))
}

/// DELETE /projects/{id}
///
/// Refused with 409 while the project still has time entries.
async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProjectId>,
) -> ApiResult<StatusCode> {
    ProjectRepository::new((*state.db).clone())
        .delete(auth.user_id(), id)
        .await?;

    info!(user_id = %auth.user_id(), project_id = %id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
