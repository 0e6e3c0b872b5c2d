//! Project repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use timekeep_shared::types::{ProjectId, UserId};
use uuid::Uuid;

use crate::entities::{projects, time_entries};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Blank project name.
    #[error("Project name cannot be empty")]
    EmptyName,

    /// The user already has a project with this name.
    #[error("Project already exists: {0}")]
    DuplicateName(String),

    /// Project not found for this user.
    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    /// Project still has time entries.
    #[error("Project {0} has time entries; deactivate it instead")]
    HasEntries(ProjectId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name, unique per user.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Project repository.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's projects by name, optionally only active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: UserId,
        active_only: bool,
    ) -> Result<Vec<projects::Model>, DbErr> {
        let mut query =
            projects::Entity::find().filter(projects::Column::UserId.eq(user_id.into_inner()));
        if active_only {
            query = query.filter(projects::Column::IsActive.eq(true));
        }
        query.order_by_asc(projects::Column::Name).all(&self.db).await
    }

    /// Finds one of the user's projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        id: ProjectId,
    ) -> Result<Option<projects::Model>, DbErr> {
        projects::Entity::find_by_id(id.into_inner())
            .filter(projects::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await
    }

    /// Creates an active project.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName`, `DuplicateName`, or a database error.
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateProjectInput,
    ) -> Result<projects::Model, ProjectError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(ProjectError::EmptyName);
        }

        let existing = projects::Entity::find()
            .filter(projects::Column::UserId.eq(user_id.into_inner()))
            .filter(projects::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(ProjectError::DuplicateName(name));
        }

        let now = chrono::Utc::now().into();
        let project = projects::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id.into_inner()),
            name: Set(name),
            description: Set(input.description.filter(|d| !d.trim().is_empty())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(project.insert(&self.db).await?)
    }

    /// Flips the active flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn toggle_active(
        &self,
        user_id: UserId,
        id: ProjectId,
    ) -> Result<projects::Model, ProjectError> {
        let project = self
            .find(user_id, id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        let is_active = project.is_active;
        let mut active: projects::ActiveModel = project.into();
        active.is_active = Set(!is_active);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a project without time entries; its targets go with it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `HasEntries`, or a database error.
    pub async fn delete(&self, user_id: UserId, id: ProjectId) -> Result<(), ProjectError> {
        let project = self
            .find(user_id, id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        let entries = time_entries::Entity::find()
            .filter(time_entries::Column::ProjectId.eq(project.id))
            .count(&self.db)
            .await?;
        if entries > 0 {
            return Err(ProjectError::HasEntries(id));
        }

        projects::Entity::delete_by_id(project.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
