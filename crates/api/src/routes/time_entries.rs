//! Time entry upserts.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::put,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiResult, middleware::AuthUser, routes::months::EntryResponse};
use timekeep_db::{
    TimeEntryRepository,
    repositories::{UpsertProjectEntryInput, UpsertTravelEntryInput},
};
use timekeep_shared::types::ProjectId;

/// Creates the time entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/time-entries", put(upsert_entry))
}

/// Request body for writing one cell of the month grid.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpsertEntryRequest {
    /// Hours on a project. Overwrites any previous value for the day.
    Project {
        /// Project ID.
        project_id: ProjectId,
        /// Day (YYYY-MM-DD).
        date: NaiveDate,
        /// Hours, zero or more.
        hours: Decimal,
        /// Optional note.
        #[serde(default)]
        description: Option<String>,
    },
    /// Travel time of a day.
    Travel {
        /// Day (YYYY-MM-DD).
        date: NaiveDate,
        /// Hours, zero or more.
        hours: Decimal,
        /// Per diem claimed.
        #[serde(default)]
        per_diem: bool,
        /// Optional note.
        #[serde(default)]
        description: Option<String>,
    },
}

/// PUT /time-entries
///
/// Returns the stored entry, or 204 when a travel entry was removed.
async fn upsert_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpsertEntryRequest>,
) -> ApiResult<Response> {
    let user_id = auth.user_id();
    let repo = TimeEntryRepository::new((*state.db).clone());

    let saved = match payload {
        UpsertEntryRequest::Project {
            project_id,
            date,
            hours,
            description,
        } => Some(
            repo.upsert_project_entry(
                user_id,
                UpsertProjectEntryInput {
                    project_id,
                    date,
                    hours,
                    description,
                },
            )
            .await?,
        ),
        UpsertEntryRequest::Travel {
            date,
            hours,
            per_diem,
            description,
        } => {
            repo.upsert_travel_entry(
                user_id,
                UpsertTravelEntryInput {
                    date,
                    hours,
                    per_diem,
                    description,
                },
            )
            .await?
        }
    };

    Ok(match saved {
        Some(entry) => {
            info!(user_id = %user_id, entry_id = %entry.id, date = %entry.entry_date, "Time entry saved");
            Json(EntryResponse::from(&entry)).into_response()
        }
        None => {
            info!(user_id = %user_id, "Travel entry cleared");
            StatusCode::NO_CONTENT.into_response()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::test_support::{access_token, json_body, protected, send, test_state};

    #[tokio::test]
    async fn test_negative_hours_are_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let body = format!(
            r#"{{"type":"project","project_id":"{}","date":"2026-01-05","hours":-1}}"#,
            Uuid::new_v4()
        );
        let response = send(app, "PUT", "/time-entries", Some(&token), Some(&body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_negative_travel_hours_are_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "PUT",
            "/time-entries",
            Some(&token),
            Some(r#"{"type":"travel","date":"2026-01-05","hours":"-2.5","per_diem":true}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hours_beyond_a_day_are_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let body = format!(
            r#"{{"type":"project","project_id":"{}","date":"2026-03-02","hours":"1000.555"}}"#,
            Uuid::new_v4()
        );
        let response = send(app, "PUT", "/time-entries", Some(&token), Some(&body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_travel_hours_finer_than_hundredths_are_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "PUT",
            "/time-entries",
            Some(&token),
            Some(r#"{"type":"travel","date":"2026-03-02","hours":"2.125","per_diem":false}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_request_is_tagged_by_type() {
        let request: UpsertEntryRequest =
            serde_json::from_str(r#"{"type":"travel","date":"2026-03-02","hours":"3.5"}"#)
                .unwrap();
        assert!(matches!(
            request,
            UpsertEntryRequest::Travel { per_diem: false, .. }
        ));
    }
}
