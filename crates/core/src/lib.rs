//! Core business logic for Timekeep.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Data flows one way through the modules:
//!
//! - `calendar` - Public holidays and calendar months
//! - `workday` - Day classification and required hours
//! - `timesheet` - Aggregation of reported hours against a classified month
//! - `reports` - Period summaries built from monthly aggregates
//!
//! `auth` holds password hashing for the login collaborator.

pub mod auth;
pub mod calendar;
pub mod reports;
pub mod timesheet;
pub mod workday;
