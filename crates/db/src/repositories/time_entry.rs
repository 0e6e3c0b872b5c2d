//! Time entry repository for database operations.
//!
//! Entries are written with upsert semantics: at most one project entry per
//! (user, project, day) and one travel entry per (user, day).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use timekeep_core::timesheet::{EntryError, TimeEntry};
use timekeep_shared::types::{ProjectId, UserId};
use uuid::Uuid;

use crate::entities::{projects, time_entries};

/// Error types for time entry operations.
#[derive(Debug, thiserror::Error)]
pub enum TimeEntryError {
    /// Project missing or owned by someone else.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Entry rejected by validation.
    #[error(transparent)]
    Invalid(#[from] EntryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for writing a project entry.
#[derive(Debug, Clone)]
pub struct UpsertProjectEntryInput {
    /// Project worked on.
    pub project_id: ProjectId,
    /// Day.
    pub date: NaiveDate,
    /// Hours, replacing any previous value.
    pub hours: Decimal,
    /// Optional note.
    pub description: Option<String>,
}

/// Input for writing the travel entry of a day.
#[derive(Debug, Clone)]
pub struct UpsertTravelEntryInput {
    /// Day.
    pub date: NaiveDate,
    /// Travel hours.
    pub hours: Decimal,
    /// Per diem claimed.
    pub per_diem: bool,
    /// Optional note.
    pub description: Option<String>,
}

/// Time entry repository.
#[derive(Debug, Clone)]
pub struct TimeEntryRepository {
    db: DatabaseConnection,
}

impl TimeEntryRepository {
    /// Creates a new time entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or overwrites the hours of a project on a day.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for negative hours, `ProjectNotFound` when the project
    /// is not the user's, or a database error.
    pub async fn upsert_project_entry(
        &self,
        user_id: UserId,
        input: UpsertProjectEntryInput,
    ) -> Result<time_entries::Model, TimeEntryError> {
        TimeEntry::project(input.project_id, input.date, input.hours)?;

        let txn = self.db.begin().await?;

        let owned = projects::Entity::find_by_id(input.project_id.into_inner())
            .filter(projects::Column::UserId.eq(user_id.into_inner()))
            .one(&txn)
            .await?;
        if owned.is_none() {
            return Err(TimeEntryError::ProjectNotFound(input.project_id));
        }

        let existing = time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id.into_inner()))
            .filter(time_entries::Column::ProjectId.eq(input.project_id.into_inner()))
            .filter(time_entries::Column::EntryDate.eq(input.date))
            .one(&txn)
            .await?;

        let now = chrono::Utc::now().into();
        let saved = if let Some(entry) = existing {
            let mut active: time_entries::ActiveModel = entry.into();
            active.hours = Set(input.hours);
            if input.description.is_some() {
                active.description = Set(input.description);
            }
            active.updated_at = Set(now);
            active.update(&txn).await?
        } else {
            time_entries::ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(user_id.into_inner()),
                project_id: Set(Some(input.project_id.into_inner())),
                entry_date: Set(input.date),
                hours: Set(input.hours),
                description: Set(input.description),
                is_travel: Set(false),
                per_diem: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?
        };

        txn.commit().await?;
        Ok(saved)
    }

    /// Writes the travel entry of a day.
    ///
    /// Positive hours, or zero hours with per diem, keep a row; zero hours
    /// without per diem remove it and return `None`.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for negative hours, or a database error.
    pub async fn upsert_travel_entry(
        &self,
        user_id: UserId,
        input: UpsertTravelEntryInput,
    ) -> Result<Option<time_entries::Model>, TimeEntryError> {
        TimeEntry::travel(input.date, input.hours, input.per_diem)?;

        let txn = self.db.begin().await?;

        let existing = time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id.into_inner()))
            .filter(time_entries::Column::IsTravel.eq(true))
            .filter(time_entries::Column::EntryDate.eq(input.date))
            .one(&txn)
            .await?;

        let keep = input.hours > Decimal::ZERO || input.per_diem;
        let now = chrono::Utc::now().into();
        let saved = match (existing, keep) {
            (Some(entry), false) => {
                entry.delete(&txn).await?;
                None
            }
            (None, false) => None,
            (Some(entry), true) => {
                let mut active: time_entries::ActiveModel = entry.into();
                active.hours = Set(input.hours);
                active.per_diem = Set(input.per_diem);
                if input.description.is_some() {
                    active.description = Set(input.description);
                }
                active.updated_at = Set(now);
                Some(active.update(&txn).await?)
            }
            (None, true) => Some(
                time_entries::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    user_id: Set(user_id.into_inner()),
                    project_id: Set(None),
                    entry_date: Set(input.date),
                    hours: Set(input.hours),
                    description: Set(input.description),
                    is_travel: Set(true),
                    per_diem: Set(input.per_diem),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?,
            ),
        };

        txn.commit().await?;
        Ok(saved)
    }

    /// A user's entries dated `from..=to`, by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_in_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<time_entries::Model>, DbErr> {
        time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id.into_inner()))
            .filter(time_entries::Column::EntryDate.gte(from))
            .filter(time_entries::Column::EntryDate.lte(to))
            .order_by_asc(time_entries::Column::EntryDate)
            .all(&self.db)
            .await
    }
}

/// Converts a stored row into a core time entry.
///
/// # Errors
///
/// Returns an `EntryError` for a row with hours outside 0-24.
pub fn to_time_entry(model: &time_entries::Model) -> Result<TimeEntry, EntryError> {
    match (model.is_travel, model.project_id) {
        (false, Some(project_id)) => {
            TimeEntry::project(ProjectId::from(project_id), model.entry_date, model.hours)
        }
        _ => TimeEntry::travel(model.entry_date, model.hours, model.per_diem),
    }
}
