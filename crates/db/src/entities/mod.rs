//! `SeaORM` entity definitions.

pub mod leave_periods;
pub mod project_targets;
pub mod projects;
pub mod sea_orm_active_enums;
pub mod time_entries;
pub mod users;

pub mod prelude {
    //! Entity re-exports.

    pub use super::leave_periods::Entity as LeavePeriods;
    pub use super::project_targets::Entity as ProjectTargets;
    pub use super::projects::Entity as Projects;
    pub use super::time_entries::Entity as TimeEntries;
    pub use super::users::Entity as Users;
}
