//! Public holiday listing.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{AppState, error::ApiResult, presentation::holiday_name};
use timekeep_core::calendar::HolidayKind;

/// Creates the holiday routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/holidays/{year}", get(list_holidays))
}

/// One holiday.
#[derive(Debug, Serialize)]
pub struct HolidayResponse {
    /// Date.
    pub date: NaiveDate,
    /// Machine-readable kind.
    pub kind: HolidayKind,
    /// Swedish name.
    pub name: &'static str,
}

/// Holidays of a year.
#[derive(Debug, Serialize)]
pub struct HolidaysResponse {
    /// Requested year.
    pub year: i32,
    /// Holidays sorted by date.
    pub holidays: Vec<HolidayResponse>,
}

/// GET /holidays/{year}
async fn list_holidays(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> ApiResult<Json<HolidaysResponse>> {
    let holidays = state
        .calendar
        .holidays_for(year)?
        .into_iter()
        .map(|h| HolidayResponse {
            date: h.date,
            kind: h.kind,
            name: holiday_name(h.kind),
        })
        .collect();

    Ok(Json(HolidaysResponse { year, holidays }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    use crate::test_support::{access_token, json_body, protected, send, test_state};

    #[tokio::test]
    async fn test_holidays_require_token() {
        let state = test_state();
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/holidays/2026", None, None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_holidays_2026() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/holidays/2026", Some(&token), None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let holidays = json["holidays"].as_array().unwrap();
        assert_eq!(holidays.len(), 16);
        let eve = holidays
            .iter()
            .find(|h| h["name"] == "Midsommarafton")
            .unwrap();
        assert_eq!(eve["date"], "2026-06-19");
    }

    #[tokio::test]
    async fn test_unsupported_year_is_rejected() {
        let state = test_state();
        let token = access_token(&state, Uuid::new_v4(), false);
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/holidays/1500", Some(&token), None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let state = test_state();
        let refresh = state
            .jwt_service
            .generate_refresh_token(Uuid::new_v4(), "tester", false)
            .unwrap();
        let app = protected(routes(), &state);

        let response = send(app, "GET", "/holidays/2026", Some(&refresh), None).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["error"], "invalid_token");
    }
}
