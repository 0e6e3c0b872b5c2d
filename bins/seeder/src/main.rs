//! Database seeder for Timekeep development and testing.
//!
//! Seeds an admin account, a few projects, a vacation week and project hours
//! for the elapsed workdays of the current month.
//!
//! Usage: cargo run --bin seeder
//!
//! `SEED_ADMIN_PASSWORD` overrides the default development password.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use timekeep_core::{
    auth::hash_password,
    calendar::{HolidayCalendar, SwedishCalendar},
    workday::{LeaveType, WorkdayCalculator},
};
use timekeep_db::{
    LeaveRepository, ProjectRepository, TimeEntryRepository, UserRepository,
    repositories::{
        CreateLeaveInput, CreateProjectInput, CreateUserInput, ProjectError,
        UpsertProjectEntryInput,
    },
};
use timekeep_shared::types::{ProjectId, UserId};

const ADMIN_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "timekeep-dev";
const PROJECTS: [&str; 3] = ["Internal", "Customer Alpha", "Customer Beta"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    println!("Connecting to database...");
    let db = timekeep_db::connect(&database_url).await?;

    println!("Seeding admin user...");
    let users = UserRepository::new(db.clone());
    let (user_id, created) = match users.find_by_username(ADMIN_USERNAME).await? {
        Some(existing) => {
            println!("  Admin user already exists, skipping...");
            (UserId::from_uuid(existing.id), false)
        }
        None => {
            let password = std::env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());
            let user = users
                .create(CreateUserInput {
                    username: ADMIN_USERNAME.to_string(),
                    email: "admin@timekeep.local".to_string(),
                    password_hash: hash_password(&password)?,
                    is_admin: true,
                })
                .await?;
            println!("  Created admin user: {ADMIN_USERNAME}");
            (UserId::from_uuid(user.id), true)
        }
    };

    println!("Seeding projects...");
    let project_ids = seed_projects(&ProjectRepository::new(db.clone()), user_id).await?;

    let today = Utc::now().date_naive();
    if created {
        println!("Seeding vacation...");
        let start = NaiveDate::from_ymd_opt(today.year(), 7, 6)
            .ok_or_else(|| anyhow::anyhow!("no July in {}", today.year()))?;
        LeaveRepository::new(db.clone())
            .create(
                user_id,
                CreateLeaveInput {
                    leave_type: LeaveType::Vacation,
                    start_date: start,
                    end_date: start + chrono::Days::new(4),
                    description: Some("Summer vacation".to_string()),
                },
            )
            .await?;
        println!("  Registered vacation week from {start}");
    }

    println!("Seeding time entries...");
    let holidays = SwedishCalendar.holidays_for(today.year())?;
    let calendar = WorkdayCalculator::default().classify(
        today.year(),
        today.month(),
        &holidays,
        &[],
    )?;
    let entries = TimeEntryRepository::new(db.clone());
    let mut written = 0;
    for (index, day) in calendar
        .days()
        .iter()
        .filter(|d| d.requires_work && d.date < today)
        .enumerate()
    {
        let Some(project_id) = project_ids.get(index % project_ids.len()).copied() else {
            break;
        };
        entries
            .upsert_project_entry(
                user_id,
                UpsertProjectEntryInput {
                    project_id,
                    date: day.date,
                    hours: Decimal::from(8),
                    description: None,
                },
            )
            .await?;
        written += 1;
    }
    println!("  Wrote {written} time entries");

    println!("Seeding complete!");
    Ok(())
}

/// Creates the sample projects, reusing any that already exist.
async fn seed_projects(
    repo: &ProjectRepository,
    user_id: UserId,
) -> anyhow::Result<Vec<ProjectId>> {
    for name in PROJECTS {
        match repo
            .create(
                user_id,
                CreateProjectInput {
                    name: name.to_string(),
                    description: None,
                },
            )
            .await
        {
            Ok(_) => println!("  Created project: {name}"),
            Err(ProjectError::DuplicateName(_)) => {
                println!("  Project {name} already exists, skipping...");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(repo
        .list(user_id, true)
        .await?
        .into_iter()
        .map(|p| ProjectId::from_uuid(p.id))
        .collect())
}
