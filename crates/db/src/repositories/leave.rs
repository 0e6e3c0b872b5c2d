//! Leave period repository for database operations.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use timekeep_core::workday::{LeavePeriod, LeaveType, WorkdayError};
use timekeep_shared::types::{LeavePeriodId, UserId};
use uuid::Uuid;

use crate::entities::leave_periods;

/// Error types for leave operations.
#[derive(Debug, thiserror::Error)]
pub enum LeaveError {
    /// Leave period not found for this user.
    #[error("Leave period not found: {0}")]
    NotFound(LeavePeriodId),

    /// Invalid period.
    #[error(transparent)]
    Invalid(#[from] WorkdayError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering leave.
#[derive(Debug, Clone)]
pub struct CreateLeaveInput {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Optional note.
    pub description: Option<String>,
}

/// Leave period repository.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a leave period.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` when the period ends before it starts or falls outside
    /// the supported years, or a database error.
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateLeaveInput,
    ) -> Result<leave_periods::Model, LeaveError> {
        LeavePeriod::new(input.leave_type, input.start_date, input.end_date)?;

        let period = leave_periods::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id.into_inner()),
            leave_type: Set(input.leave_type.into()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(period.insert(&self.db).await?)
    }

    /// All of a user's leave, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<leave_periods::Model>, DbErr> {
        leave_periods::Entity::find()
            .filter(leave_periods::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(leave_periods::Column::StartDate)
            .all(&self.db)
            .await
    }

    /// Leave periods overlapping `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_overlapping(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<leave_periods::Model>, DbErr> {
        leave_periods::Entity::find()
            .filter(leave_periods::Column::UserId.eq(user_id.into_inner()))
            .filter(leave_periods::Column::StartDate.lte(to))
            .filter(leave_periods::Column::EndDate.gte(from))
            .order_by_asc(leave_periods::Column::StartDate)
            .all(&self.db)
            .await
    }

    /// Deletes one of the user's leave periods.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: UserId, id: LeavePeriodId) -> Result<(), LeaveError> {
        let result = leave_periods::Entity::delete_many()
            .filter(leave_periods::Column::Id.eq(id.into_inner()))
            .filter(leave_periods::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(LeaveError::NotFound(id));
        }
        Ok(())
    }
}

/// Converts a stored row into a core leave period.
///
/// # Errors
///
/// Returns `WorkdayError::InvalidDateRange` for a reversed range.
pub fn to_leave_period(model: &leave_periods::Model) -> Result<LeavePeriod, WorkdayError> {
    LeavePeriod::new(model.leave_type.into(), model.start_date, model.end_date)
}
