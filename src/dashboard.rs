//! Home-screen summary: four headline counters and a short
//! recent-activity feed. Thinner than the analytics summary, refreshed
//! on the same polling interval.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::analytics::{merge_activity, ActivityEvent};
use crate::analytics::dates::{parse_timestamp, start_of_day};
use crate::config::DASHBOARD_ACTIVITY_LIMIT;
use crate::models::{Patient, RecentReport, TestResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: u32,
    pub total_tests: u32,
    pub reports_generated: i64,
    pub tests_today: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEvent>,
}

pub fn build_dashboard(
    patients: &[Patient],
    tests: &[TestResult],
    report_count: i64,
    recent_reports: &[RecentReport],
    now: NaiveDateTime,
) -> DashboardData {
    let today = start_of_day(now).date();
    let tests_today = tests
        .iter()
        .filter_map(|t| t.test_date.as_deref().and_then(parse_timestamp))
        .filter(|dt| dt.date() == today)
        .count() as u32;

    DashboardData {
        stats: DashboardStats {
            total_patients: patients.len() as u32,
            total_tests: tests.len() as u32,
            reports_generated: report_count,
            tests_today,
        },
        recent_activity: merge_activity(patients, tests, recent_reports, DASHBOARD_ACTIVITY_LIMIT),
    }
}
