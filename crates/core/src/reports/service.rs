//! Report generation service.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use timekeep_shared::types::ProjectId;

use super::error::ReportError;
use super::types::{
    MonthlyRow, PeriodSummary, ProjectShare, ProjectTarget, ReportPeriod, TargetComparison,
    WorkedVsRequired,
};
use crate::timesheet::{MonthAggregate, TravelSummary, percent_of};

/// Service for generating time reports.
pub struct ReportService;

impl ReportService {
    /// Summarizes the aggregates falling inside `period`.
    ///
    /// Aggregates for months outside the period are ignored. Months without an
    /// aggregate contribute nothing.
    #[must_use]
    pub fn summarize(period: ReportPeriod, aggregates: &[MonthAggregate]) -> PeriodSummary {
        let mut selected: Vec<&MonthAggregate> = aggregates
            .iter()
            .filter(|a| period.contains(a.month))
            .collect();
        selected.sort_by_key(|a| a.month);

        let mut hours_by_project: BTreeMap<ProjectId, Decimal> = BTreeMap::new();
        let mut leave_days_by_type = BTreeMap::new();
        let mut travel = TravelSummary::default();
        let (mut worked, mut required, mut workdays) = (Decimal::ZERO, Decimal::ZERO, 0);
        let mut months = Vec::with_capacity(selected.len());

        for aggregate in selected {
            for (project, hours) in &aggregate.per_project {
                *hours_by_project.entry(*project).or_default() += *hours;
            }
            for (leave_type, days) in &aggregate.leave_days {
                *leave_days_by_type.entry(*leave_type).or_insert(0) += *days;
            }
            travel += aggregate.travel;
            worked += aggregate.total_worked;
            required += aggregate.total_required;
            workdays += aggregate.workdays;
            months.push(Self::monthly_row(aggregate));
        }

        let project_shares = Self::project_shares(&hours_by_project);

        PeriodSummary {
            period,
            hours_by_project,
            leave_days_by_type,
            worked_vs_required: Self::worked_vs_required(worked, required),
            travel,
            workdays,
            months,
            project_shares,
        }
    }

    /// Summary of January through December of `year`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Calendar` for an unsupported year.
    pub fn annual(
        year: i32,
        aggregates: &[MonthAggregate],
    ) -> Result<PeriodSummary, ReportError> {
        Ok(Self::summarize(ReportPeriod::year(year)?, aggregates))
    }

    /// Share of total hours per project, largest first.
    #[must_use]
    pub fn project_shares(hours_by_project: &BTreeMap<ProjectId, Decimal>) -> Vec<ProjectShare> {
        let total: Decimal = hours_by_project.values().copied().sum();
        let mut shares: Vec<ProjectShare> = hours_by_project
            .iter()
            .map(|(project_id, hours)| ProjectShare {
                project_id: *project_id,
                hours: *hours,
                percent: percent_of(*hours, total),
            })
            .collect();
        shares.sort_by(|a, b| {
            b.hours
                .cmp(&a.hours)
                .then_with(|| a.project_id.cmp(&b.project_id))
        });
        shares
    }

    /// Compares a month's project hours with its targets.
    ///
    /// Targets for other months are ignored. Projects with hours but no
    /// target are listed without target figures.
    #[must_use]
    pub fn target_comparison(
        aggregate: &MonthAggregate,
        targets: &[ProjectTarget],
    ) -> Vec<TargetComparison> {
        let targets: BTreeMap<ProjectId, Decimal> = targets
            .iter()
            .filter(|t| t.month == aggregate.month)
            .map(|t| (t.project_id, t.percentage))
            .collect();

        let projects: BTreeSet<ProjectId> = targets
            .keys()
            .chain(aggregate.per_project.keys())
            .copied()
            .collect();

        projects
            .into_iter()
            .map(|project_id| {
                let actual_hours = aggregate
                    .per_project
                    .get(&project_id)
                    .copied()
                    .unwrap_or_default();
                let target_percent = targets.get(&project_id).copied();
                let target_hours = target_percent.map(|pct| {
                    (aggregate.total_required * pct / Decimal::ONE_HUNDRED).round_dp(2)
                });
                TargetComparison {
                    project_id,
                    target_percent,
                    target_hours,
                    actual_hours,
                    actual_percent: percent_of(actual_hours, aggregate.total_required),
                    difference_hours: target_hours.map(|target| actual_hours - target),
                }
            })
            .collect()
    }

    fn monthly_row(aggregate: &MonthAggregate) -> MonthlyRow {
        MonthlyRow {
            month: aggregate.month,
            workdays: aggregate.workdays,
            leave_days: aggregate.leave_days.clone(),
            hours_by_project: aggregate.per_project.clone(),
            totals: Self::worked_vs_required(aggregate.total_worked, aggregate.total_required),
            travel: aggregate.travel,
        }
    }

    fn worked_vs_required(worked: Decimal, required: Decimal) -> WorkedVsRequired {
        WorkedVsRequired {
            worked,
            required,
            variance: worked - required,
            utilization_percent: percent_of(worked, required),
        }
    }
}
