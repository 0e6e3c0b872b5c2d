//! Time reports.
//!
//! Pure recombination of monthly aggregates into period summaries:
//! - hours per project and project shares
//! - leave days per type
//! - worked versus required hours, per month and in total
//! - monthly project targets compared with actual hours

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
