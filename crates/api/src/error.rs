//! Mapping of domain and repository errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use timekeep_core::{
    auth::{CredentialError, PasswordError},
    calendar::CalendarError,
    reports::ReportError,
    timesheet::EntryError,
    workday::WorkdayError,
};
use timekeep_db::repositories::{LeaveError, ProjectError, TargetError, TimeEntryError, UserError};
use timekeep_shared::{AppError, JwtError};

/// Error returned by handlers.
///
/// Renders as `{"error": <code>, "message": <text>}` with the status of the
/// wrapped [`AppError`]. Server-side failures are logged and replaced by a
/// generic message.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 403 with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = if self.0.is_internal() {
            error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            inner_message(&self.0)
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

fn inner_message(error: &AppError) -> String {
    match error {
        AppError::Unauthorized(m)
        | AppError::Forbidden(m)
        | AppError::NotFound(m)
        | AppError::Validation(m)
        | AppError::Conflict(m)
        | AppError::Database(m)
        | AppError::Internal(m) => m.clone(),
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl From<CalendarError> for ApiError {
    fn from(e: CalendarError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<WorkdayError> for ApiError {
    fn from(e: WorkdayError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<EntryError> for ApiError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::NegativeHours(_)
            | EntryError::TooManyHours(_)
            | EntryError::TooPrecise(_) => Self::validation(e.to_string()),
            EntryError::DuplicateEntry { .. } | EntryError::DuplicateTravel(_) => {
                Self(AppError::Conflict(e.to_string()))
            }
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<CredentialError> for ApiError {
    fn from(e: CredentialError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self(AppError::Internal(e.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::EncodingError(_) => Self(AppError::Internal(e.to_string())),
            JwtError::Expired => Self::unauthorized("Token has expired"),
            JwtError::DecodingError(_) | JwtError::WrongKind { .. } => {
                Self::unauthorized("Invalid or malformed token")
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::DuplicateUsername(_) | UserError::DuplicateEmail(_) => {
                Self(AppError::Conflict(e.to_string()))
            }
            UserError::NotFound(_) => Self::not_found(e.to_string()),
            UserError::Database(db) => db.into(),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(e: ProjectError) -> Self {
        match e {
            ProjectError::EmptyName => Self::validation(e.to_string()),
            ProjectError::DuplicateName(_) | ProjectError::HasEntries(_) => {
                Self(AppError::Conflict(e.to_string()))
            }
            ProjectError::NotFound(_) => Self::not_found(e.to_string()),
            ProjectError::Database(db) => db.into(),
        }
    }
}

impl From<TimeEntryError> for ApiError {
    fn from(e: TimeEntryError) -> Self {
        match e {
            TimeEntryError::ProjectNotFound(_) => Self::not_found(e.to_string()),
            TimeEntryError::Invalid(entry) => entry.into(),
            TimeEntryError::Database(db) => db.into(),
        }
    }
}

impl From<LeaveError> for ApiError {
    fn from(e: LeaveError) -> Self {
        match e {
            LeaveError::NotFound(_) => Self::not_found(e.to_string()),
            LeaveError::Invalid(workday) => workday.into(),
            LeaveError::Database(db) => db.into(),
        }
    }
}

impl From<TargetError> for ApiError {
    fn from(e: TargetError) -> Self {
        match e {
            TargetError::ProjectNotFound(_) | TargetError::NotFound(_) => {
                Self::not_found(e.to_string())
            }
            TargetError::Invalid(report) => report.into(),
            TargetError::Database(db) => db.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use timekeep_shared::types::{ProjectId, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn status_of(error: impl Into<ApiError>) -> u16 {
        error.into().0.status_code()
    }

    #[rstest]
    #[case(ApiError::from(CalendarError::InvalidYear(1500)), 400)]
    #[case(ApiError::from(CalendarError::InvalidMonth(13)), 400)]
    #[case(ApiError::from(EntryError::NegativeHours(Decimal::NEGATIVE_ONE)), 400)]
    #[case(ApiError::from(EntryError::TooManyHours(Decimal::ONE_HUNDRED)), 400)]
    #[case(ApiError::from(EntryError::DuplicateTravel(date(2026, 1, 5))), 409)]
    #[case(ApiError::from(CredentialError::PasswordTooShort), 400)]
    #[case(ApiError::from(JwtError::Expired), 401)]
    #[case(ApiError::from(JwtError::EncodingError("boom".into())), 500)]
    #[case(ApiError::from(UserError::DuplicateUsername("anna".into())), 409)]
    #[case(ApiError::from(UserError::NotFound(UserId::new())), 404)]
    #[case(ApiError::from(ProjectError::EmptyName), 400)]
    #[case(ApiError::from(ProjectError::HasEntries(ProjectId::new())), 409)]
    #[case(ApiError::from(TimeEntryError::ProjectNotFound(ProjectId::new())), 404)]
    #[case(ApiError::from(DbErr::Custom("down".into())), 500)]
    fn test_error_status_mapping(#[case] error: ApiError, #[case] status: u16) {
        assert_eq!(error.0.status_code(), status);
    }

    #[test]
    fn test_wrapped_errors_keep_inner_mapping() {
        let invalid = WorkdayError::InvalidDateRange {
            start: date(2026, 5, 2),
            end: date(2026, 5, 1),
        };
        assert_eq!(status_of(LeaveError::Invalid(invalid)), 400);
        assert_eq!(
            status_of(TimeEntryError::Invalid(EntryError::DuplicateEntry {
                project: ProjectId::new(),
                date: date(2026, 1, 5),
            })),
            409
        );
        assert_eq!(
            status_of(TargetError::Invalid(ReportError::InvalidTargetPercentage(
                Decimal::from(120)
            ))),
            400
        );
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_details() {
        let response = ApiError::from(DbErr::Custom("password=hunter2".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "database_error");
        assert_eq!(json["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_client_errors_carry_message() {
        let response = ApiError::from(CalendarError::InvalidMonth(13)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["message"], "Month 13 is not a calendar month");
    }
}
