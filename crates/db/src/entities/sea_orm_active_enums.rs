//! `SeaORM` active enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use timekeep_core::workday;

/// Postgres `leave_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_type")]
pub enum LeaveType {
    /// Vacation.
    #[sea_orm(string_value = "vacation")]
    Vacation,
    /// Sick leave.
    #[sea_orm(string_value = "sick")]
    Sick,
}

impl From<LeaveType> for workday::LeaveType {
    fn from(value: LeaveType) -> Self {
        match value {
            LeaveType::Vacation => Self::Vacation,
            LeaveType::Sick => Self::Sick,
        }
    }
}

impl From<workday::LeaveType> for LeaveType {
    fn from(value: workday::LeaveType) -> Self {
        match value {
            workday::LeaveType::Vacation => Self::Vacation,
            workday::LeaveType::Sick => Self::Sick,
        }
    }
}
