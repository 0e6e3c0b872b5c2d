//! Monthly project target repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use timekeep_core::calendar::Month;
use timekeep_core::reports::{ProjectTarget, ReportError};
use timekeep_shared::types::{ProjectId, ProjectTargetId, UserId};
use uuid::Uuid;

use crate::entities::{project_targets, projects};

/// Error types for target operations.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// Project missing or owned by someone else.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Target not found for this user.
    #[error("Target not found: {0}")]
    NotFound(ProjectTargetId),

    /// Invalid target.
    #[error(transparent)]
    Invalid(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Project target repository.
#[derive(Debug, Clone)]
pub struct ProjectTargetRepository {
    db: DatabaseConnection,
}

impl ProjectTargetRepository {
    /// Creates a new target repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the target percentage of a project for a month.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` outside 0-100, `ProjectNotFound`, or a database error.
    pub async fn upsert(
        &self,
        user_id: UserId,
        project_id: ProjectId,
        month: Month,
        percentage: Decimal,
    ) -> Result<project_targets::Model, TargetError> {
        ProjectTarget::new(project_id, month, percentage)?;

        let txn = self.db.begin().await?;

        let owned = projects::Entity::find_by_id(project_id.into_inner())
            .filter(projects::Column::UserId.eq(user_id.into_inner()))
            .one(&txn)
            .await?;
        if owned.is_none() {
            return Err(TargetError::ProjectNotFound(project_id));
        }

        let (year, month_number) = db_month(month);
        let existing = project_targets::Entity::find()
            .filter(project_targets::Column::UserId.eq(user_id.into_inner()))
            .filter(project_targets::Column::ProjectId.eq(project_id.into_inner()))
            .filter(project_targets::Column::Year.eq(year))
            .filter(project_targets::Column::Month.eq(month_number))
            .one(&txn)
            .await?;

        let now = chrono::Utc::now().into();
        let saved = if let Some(target) = existing {
            let mut active: project_targets::ActiveModel = target.into();
            active.target_percentage = Set(percentage);
            active.updated_at = Set(now);
            active.update(&txn).await?
        } else {
            project_targets::ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(user_id.into_inner()),
                project_id: Set(project_id.into_inner()),
                year: Set(year),
                month: Set(month_number),
                target_percentage: Set(percentage),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?
        };

        txn.commit().await?;
        Ok(saved)
    }

    /// Targets of a user for one month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_month(
        &self,
        user_id: UserId,
        month: Month,
    ) -> Result<Vec<project_targets::Model>, DbErr> {
        let (year, month_number) = db_month(month);
        project_targets::Entity::find()
            .filter(project_targets::Column::UserId.eq(user_id.into_inner()))
            .filter(project_targets::Column::Year.eq(year))
            .filter(project_targets::Column::Month.eq(month_number))
            .all(&self.db)
            .await
    }

    /// Deletes one of the user's targets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: UserId, id: ProjectTargetId) -> Result<(), TargetError> {
        let result = project_targets::Entity::delete_many()
            .filter(project_targets::Column::Id.eq(id.into_inner()))
            .filter(project_targets::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(TargetError::NotFound(id));
        }
        Ok(())
    }
}

fn db_month(month: Month) -> (i32, i32) {
    // Month numbers are 1-12.
    (month.year(), i32::try_from(month.month()).unwrap_or_default())
}

/// Converts a stored row into a core project target.
///
/// # Errors
///
/// Returns `ReportError` for an out-of-range month or percentage.
pub fn to_project_target(model: &project_targets::Model) -> Result<ProjectTarget, ReportError> {
    let month_number = u32::try_from(model.month).unwrap_or_default();
    let month = Month::new(model.year, month_number)?;
    ProjectTarget::new(ProjectId::from(model.project_id), month, model.target_percentage)
}
