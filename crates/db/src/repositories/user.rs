//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use timekeep_shared::types::UserId;
use uuid::Uuid;

use crate::entities::users;

/// Transaction-scoped advisory lock serializing first-user registration.
const REGISTRATION_LOCK_SQL: &str = "SELECT pg_advisory_xact_lock(7_104_001)";

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Username already taken.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Email already registered.
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// User not found.
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Number of registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        users::Entity::find().count(&self.db).await
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// All users ordered by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` or `DuplicateEmail` when taken, or a
    /// database error.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        insert_user(&self.db, input).await
    }

    /// Creates the first user as administrator, unless any user exists.
    ///
    /// The emptiness check and the insert run in one transaction holding an
    /// advisory lock, so concurrent registrations yield a single admin.
    /// Returns `None` when a user already exists.
    ///
    /// # Errors
    ///
    /// Returns a database error.
    pub async fn create_first_admin(
        &self,
        input: CreateUserInput,
    ) -> Result<Option<users::Model>, UserError> {
        let txn = self.db.begin().await?;
        txn.execute_unprepared(REGISTRATION_LOCK_SQL).await?;

        if users::Entity::find().count(&txn).await? > 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let user = insert_user(
            &txn,
            CreateUserInput {
                is_admin: true,
                ..input
            },
        )
        .await?;
        txn.commit().await?;
        Ok(Some(user))
    }

    /// Sets the administrator flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user, or a database error.
    pub async fn set_admin(&self, id: UserId, is_admin: bool) -> Result<users::Model, UserError> {
        let user = self.find_by_id(id).await?.ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        active.is_admin = Set(is_admin);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a user together with all of their data.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user, or a database error.
    pub async fn delete(&self, id: UserId) -> Result<(), UserError> {
        let result = users::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

async fn insert_user<C>(db: &C, input: CreateUserInput) -> Result<users::Model, UserError>
where
    C: ConnectionTrait,
{
    let username_taken = users::Entity::find()
        .filter(users::Column::Username.eq(input.username.as_str()))
        .count(db)
        .await?
        > 0;
    if username_taken {
        return Err(UserError::DuplicateUsername(input.username));
    }
    let email_taken = users::Entity::find()
        .filter(users::Column::Email.eq(input.email.as_str()))
        .count(db)
        .await?
        > 0;
    if email_taken {
        return Err(UserError::DuplicateEmail(input.email));
    }

    let now = chrono::Utc::now().into();
    let user = users::ActiveModel {
        id: Set(Uuid::now_v7()),
        username: Set(input.username),
        email: Set(input.email),
        password_hash: Set(input.password_hash),
        is_admin: Set(input.is_admin),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Ok(user.insert(db).await?)
}
