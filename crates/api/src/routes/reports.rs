//! Annual and month-range reports.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiResult, middleware::AuthUser, timesheet::load_months};
use timekeep_core::{
    calendar::Month,
    reports::{PeriodSummary, ReportPeriod, ReportService},
    timesheet::MonthAggregate,
};
use timekeep_db::ProjectRepository;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/annual/{year}", get(annual_report))
        .route("/reports/range", get(range_report))
}

/// Query parameters for a range report.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// First month (YYYY-MM).
    pub from: Month,
    /// Last month, inclusive (YYYY-MM).
    pub to: Month,
}

/// A period summary with project names resolved.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Summary figures.
    #[serde(flatten)]
    pub summary: PeriodSummary,
    /// Names of the user's projects by ID.
    pub project_names: BTreeMap<Uuid, String>,
}

/// GET /reports/annual/{year}
async fn annual_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(year): Path<i32>,
) -> ApiResult<Json<ReportResponse>> {
    build_report(&state, &auth, ReportPeriod::year(year)?).await
}

/// GET /reports/range?from=YYYY-MM&to=YYYY-MM
async fn range_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<ReportResponse>> {
    build_report(&state, &auth, ReportPeriod::new(query.from, query.to)?).await
}

async fn build_report(
    state: &AppState,
    auth: &AuthUser,
    period: ReportPeriod,
) -> ApiResult<Json<ReportResponse>> {
    let user_id = auth.user_id();
    let months = period.months()?;

    let loaded = load_months(state, user_id, &months).await?;
    let aggregates: Vec<MonthAggregate> = loaded.months.into_iter().map(|m| m.aggregate).collect();

    let project_names = ProjectRepository::new((*state.db).clone())
        .list(user_id, false)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    Ok(Json(ReportResponse {
        summary: ReportService::summarize(period, &aggregates),
        project_names,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::test_support::{access_token, json_body, protected, send, test_state};

    #[tokio::test]
    async fn test_reversed_range_is_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "GET",
            "/reports/range?from=2026-06&to=2026-01",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_range_longer_than_five_years_is_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(
            app,
            "GET",
            "/reports/range?from=1583-01&to=9999-12",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].as_str().unwrap().contains("at most 60"));
    }

    #[tokio::test]
    async fn test_annual_report_rejects_unsupported_year() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/reports/annual/10000", Some(&token), None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
