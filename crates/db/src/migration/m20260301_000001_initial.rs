//! Initial database migration.
//!
//! Creates the leave type enum and the users, projects, time entries,
//! leave periods and project targets tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(TIME_ENTRIES_SQL).await?;
        db.execute_unprepared(LEAVE_PERIODS_SQL).await?;
        db.execute_unprepared(PROJECT_TARGETS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE leave_type AS ENUM ('vacation', 'sick');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username VARCHAR(80) NOT NULL,
    email VARCHAR(120) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    is_admin BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_users_username UNIQUE (username),
    CONSTRAINT uq_users_email UNIQUE (email)
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(100) NOT NULL,
    description TEXT,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_projects_user_name UNIQUE (user_id, name)
);

CREATE INDEX idx_projects_user ON projects(user_id, is_active);
";

// NO ACTION on project_id: a user delete cascades through projects and entries
// in one statement, a project delete with remaining entries fails.
const TIME_ENTRIES_SQL: &str = r"
CREATE TABLE time_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    project_id UUID REFERENCES projects(id) ON DELETE NO ACTION,
    entry_date DATE NOT NULL,
    hours NUMERIC(5, 2) NOT NULL,
    description TEXT,
    is_travel BOOLEAN NOT NULL DEFAULT false,
    per_diem BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_time_entries_hours CHECK (hours BETWEEN 0 AND 24),
    CONSTRAINT chk_time_entries_kind CHECK (
        (is_travel AND project_id IS NULL)
        OR (NOT is_travel AND project_id IS NOT NULL AND NOT per_diem)
    )
);

-- One entry per (user, project, day)
CREATE UNIQUE INDEX uq_time_entries_project_day
    ON time_entries(user_id, project_id, entry_date) WHERE project_id IS NOT NULL;

-- One travel entry per (user, day)
CREATE UNIQUE INDEX uq_time_entries_travel_day
    ON time_entries(user_id, entry_date) WHERE is_travel;

CREATE INDEX idx_time_entries_user_date ON time_entries(user_id, entry_date);
";

const LEAVE_PERIODS_SQL: &str = r"
CREATE TABLE leave_periods (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    leave_type leave_type NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_leave_periods_range CHECK (end_date >= start_date)
);

CREATE INDEX idx_leave_periods_user_dates ON leave_periods(user_id, start_date, end_date);
";

const PROJECT_TARGETS_SQL: &str = r"
CREATE TABLE project_targets (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    year INTEGER NOT NULL,
    month INTEGER NOT NULL,
    target_percentage NUMERIC(5, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_project_targets_month UNIQUE (user_id, project_id, year, month),
    CONSTRAINT chk_project_targets_year CHECK (year BETWEEN 1583 AND 9999),
    CONSTRAINT chk_project_targets_month CHECK (month BETWEEN 1 AND 12),
    CONSTRAINT chk_project_targets_percentage CHECK (target_percentage BETWEEN 0 AND 100)
);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS project_targets CASCADE;
DROP TABLE IF EXISTS leave_periods CASCADE;
DROP TABLE IF EXISTS time_entries CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS leave_type;
";
