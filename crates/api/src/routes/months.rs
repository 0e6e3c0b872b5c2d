//! Month view: day classification, reported hours and totals.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    presentation::{DayColor, day_color, holiday_name},
    timesheet::load_months,
};
use timekeep_core::{
    calendar::{HolidayKind, Month},
    timesheet::MonthAggregate,
    workday::{DayKind, LeaveType},
};
use timekeep_db::{ProjectRepository, entities::time_entries};

/// Creates the month view routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/months/{year}/{month}", get(month_view))
}

/// Holiday shown on a day.
#[derive(Debug, Serialize)]
pub struct DayHoliday {
    /// Machine-readable kind.
    pub kind: HolidayKind,
    /// Swedish name.
    pub name: &'static str,
}

/// A stored entry as shown in the month view.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Project, absent for travel.
    pub project_id: Option<Uuid>,
    /// Hours.
    pub hours: Decimal,
    /// Free text.
    pub description: Option<String>,
    /// Travel entry flag.
    pub is_travel: bool,
    /// Per-diem flag (travel only).
    pub per_diem: bool,
}

impl From<&time_entries::Model> for EntryResponse {
    fn from(model: &time_entries::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            hours: model.hours,
            description: model.description.clone(),
            is_travel: model.is_travel,
            per_diem: model.per_diem,
        }
    }
}

/// One calendar day.
#[derive(Debug, Serialize)]
pub struct DayResponse {
    /// Date.
    pub date: NaiveDate,
    /// Day of week.
    pub weekday: Weekday,
    /// Display classification.
    pub kind: DayKind,
    /// Display colour, absent for plain workdays.
    pub color: Option<DayColor>,
    /// Holiday on this day.
    pub holiday: Option<DayHoliday>,
    /// Leave covering this day.
    pub leave: Option<LeaveType>,
    /// Whether the day counts toward required hours.
    pub requires_work: bool,
    /// Project hours reported.
    pub worked: Decimal,
    /// Travel hours reported.
    pub travel: Decimal,
    /// Per-diem claimed.
    pub per_diem: bool,
    /// Stored entries.
    pub entries: Vec<EntryResponse>,
}

/// Project reference for the entry grid.
#[derive(Debug, Serialize)]
pub struct ProjectRef {
    /// Project ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Whether new hours may be reported.
    pub is_active: bool,
}

/// Full month view.
#[derive(Debug, Serialize)]
pub struct MonthResponse {
    /// The month.
    pub month: Month,
    /// Required hours per workday.
    pub hours_per_day: Decimal,
    /// One row per calendar day.
    pub days: Vec<DayResponse>,
    /// The user's projects.
    pub projects: Vec<ProjectRef>,
    /// Totals for the month.
    pub aggregate: MonthAggregate,
    /// Worked / required in percent.
    pub utilization_percent: Decimal,
}

/// GET /months/{year}/{month}
async fn month_view(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Json<MonthResponse>> {
    let month = Month::new(year, month)?;
    let user_id = auth.user_id();

    let mut loaded = load_months(&state, user_id, &[month]).await?;
    let Some(loaded_month) = loaded.months.pop() else {
        return Err(ApiError::not_found("Month not loaded"));
    };
    let projects = ProjectRepository::new((*state.db).clone())
        .list(user_id, false)
        .await?;

    let calendar = &loaded_month.calendar;
    let aggregate = loaded_month.aggregate;
    let days = calendar
        .days()
        .iter()
        .map(|day| {
            let totals = aggregate.per_day.get(&day.date).copied().unwrap_or_default();
            let kind = day.kind();
            DayResponse {
                date: day.date,
                weekday: day.weekday,
                kind,
                color: day_color(kind),
                holiday: day.holiday.map(|kind| DayHoliday {
                    kind,
                    name: holiday_name(kind),
                }),
                leave: day.leave,
                requires_work: day.requires_work,
                worked: totals.worked,
                travel: totals.travel,
                per_diem: totals.per_diem,
                entries: loaded
                    .entries
                    .iter()
                    .filter(|e| e.entry_date == day.date)
                    .map(EntryResponse::from)
                    .collect(),
            }
        })
        .collect();

    Ok(Json(MonthResponse {
        month,
        hours_per_day: calendar.hours_per_day(),
        days,
        projects: projects
            .into_iter()
            .map(|p| ProjectRef {
                id: p.id,
                name: p.name,
                is_active: p.is_active,
            })
            .collect(),
        utilization_percent: aggregate.utilization_percent(),
        aggregate,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::test_support::{access_token, protected, send, test_state};

    #[tokio::test]
    async fn test_invalid_month_is_rejected_before_store() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/months/2026/13", Some(&token), None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_month_requires_token() {
        let state = test_state();
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/months/2026/1", None, None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
