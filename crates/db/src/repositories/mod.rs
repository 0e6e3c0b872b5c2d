//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod leave;
pub mod project;
pub mod project_target;
pub mod time_entry;
pub mod user;

pub use leave::{CreateLeaveInput, LeaveError, LeaveRepository, to_leave_period};
pub use project::{CreateProjectInput, ProjectError, ProjectRepository};
pub use project_target::{ProjectTargetRepository, TargetError, to_project_target};
pub use time_entry::{
    TimeEntryError, TimeEntryRepository, UpsertProjectEntryInput, UpsertTravelEntryInput,
    to_time_entry,
};
pub use user::{CreateUserInput, UserError, UserRepository};
