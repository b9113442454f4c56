use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Patient, RecentReport, TestResult};

use super::dates::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Patient,
    Test,
    Report,
}

/// A uniform entry in the recent-activity feed, merged from patient
/// registrations, completed tests and generated reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub occurred_at: NaiveDateTime,
    /// Pre-formatted DD/MM/YYYY date for display.
    pub display_date: String,
}

fn event(kind: ActivityKind, title: &str, description: String, occurred_at: NaiveDateTime) -> ActivityEvent {
    ActivityEvent {
        kind,
        title: title.to_string(),
        description,
        occurred_at,
        display_date: occurred_at.format("%d/%m/%Y").to_string(),
    }
}

/// Merges the three event sources into one feed: newest first, stable
/// for equal timestamps (patients before tests before reports), capped
/// at `limit`. Records without a parseable timestamp are excluded
/// rather than sorted arbitrarily.
pub fn merge_activity(
    patients: &[Patient],
    tests: &[TestResult],
    reports: &[RecentReport],
    limit: usize,
) -> Vec<ActivityEvent> {
    let mut events: Vec<ActivityEvent> = Vec::new();

    for patient in patients {
        let Some(occurred_at) = patient.created_at.as_deref().and_then(parse_timestamp) else {
            continue;
        };
        events.push(event(
            ActivityKind::Patient,
            "New Patient Registration",
            format!("{} registered as a new patient", patient.full_name),
            occurred_at,
        ));
    }

    for test in tests {
        let Some(occurred_at) = test.test_date.as_deref().and_then(parse_timestamp) else {
            continue;
        };
        let patient_name = test
            .patient_id
            .and_then(|id| patients.iter().find(|p| p.id == id))
            .map(|p| p.full_name.as_str())
            .unwrap_or("Unknown");
        events.push(event(
            ActivityKind::Test,
            "Test Completed",
            format!("{} results are ready for {}", test.test_name, patient_name),
            occurred_at,
        ));
    }

    for report in reports {
        let Some(occurred_at) = report.generated_at.as_deref().and_then(parse_timestamp) else {
            continue;
        };
        events.push(event(
            ActivityKind::Report,
            "Report Generated",
            format!("Report generated for {}", report.patient_name),
            occurred_at,
        ));
    }

    // sort_by is stable: equal timestamps keep source order.
    events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    events.truncate(limit);
    events
}
