use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::ANALYTICS_ACTIVITY_LIMIT;
use crate::models::{Patient, RecentReport, TestResult};
use crate::report::range::{parse_range, ReferenceRange};

use super::activity::{merge_activity, ActivityEvent};
use super::dates::{
    last_six_months, month_label, parse_timestamp, start_of_day, start_of_month, start_of_week,
};

/// Fixed age buckets covering 0..=200. First match wins; ages outside
/// every bucket are silently dropped from the distribution.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgeBucket {
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
}

pub const AGE_GROUPS: &[AgeBucket] = &[
    AgeBucket { label: "0-17 years", min: 0, max: 17 },
    AgeBucket { label: "18-29 years", min: 18, max: 29 },
    AgeBucket { label: "30-44 years", min: 30, max: 44 },
    AgeBucket { label: "45-59 years", min: 45, max: 59 },
    AgeBucket { label: "60+ years", min: 60, max: 200 },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub male: u32,
    pub female: u32,
    pub other: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeGroupCount {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u32,
}

/// One bucket of the six-month trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthBucket {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub count: u32,
}

/// Everything the analytics screen displays, computed in one pass over
/// the fetched collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_patients: u32,
    pub this_month_patients: u32,
    pub total_tests: u32,
    pub today_tests: u32,
    pub this_week_tests: u32,
    pub gender_counts: GenderCounts,
    pub age_groups: Vec<AgeGroupCount>,
    /// Per-category test tallies in first-seen order.
    pub test_categories: Vec<CategoryCount>,
    pub normal_results: u32,
    pub abnormal_results: u32,
    pub reports_generated: i64,
    /// round(reports / tests * 100); 0 when there are no tests.
    /// Not clamped here; the display layer caps it at 100.
    pub report_completion_rate: i32,
    pub monthly_trends: Vec<MonthBucket>,
    pub recent_activity: Vec<ActivityEvent>,
}

/// Builds the analytics summary. Each component is an independent pure
/// reduction over its input collection; no shared accumulator.
pub fn build_statistics(
    patients: &[Patient],
    tests: &[TestResult],
    report_count: i64,
    recent_reports: &[RecentReport],
    now: NaiveDateTime,
) -> StatisticsSummary {
    let month_start = start_of_month(now);
    let day_start = start_of_day(now);
    let week_start = start_of_week(now);

    let mut gender_counts = GenderCounts::default();
    let mut age_groups: Vec<AgeGroupCount> = AGE_GROUPS
        .iter()
        .map(|bucket| AgeGroupCount { label: bucket.label.to_string(), count: 0 })
        .collect();
    let mut this_month_patients = 0;

    for patient in patients {
        match patient.gender.trim().to_lowercase().as_str() {
            "male" => gender_counts.male += 1,
            "female" => gender_counts.female += 1,
            _ => gender_counts.other += 1,
        }

        if let Ok(age) = patient.age.trim().parse::<i32>() {
            for (bucket, group) in AGE_GROUPS.iter().zip(age_groups.iter_mut()) {
                if age >= bucket.min && age <= bucket.max {
                    group.count += 1;
                    break;
                }
            }
        }

        if let Some(created) = patient.created_at.as_deref().and_then(parse_timestamp) {
            if created >= month_start {
                this_month_patients += 1;
            }
        }
    }

    let mut test_categories: Vec<CategoryCount> = Vec::new();
    let mut monthly_trends: Vec<MonthBucket> = last_six_months(now)
        .into_iter()
        .map(|(year, month)| MonthBucket {
            label: month_label(year, month),
            year,
            month,
            count: 0,
        })
        .collect();
    let mut today_tests = 0;
    let mut this_week_tests = 0;
    let mut normal_results = 0;
    let mut abnormal_results = 0;

    for test in tests {
        if !test.test_category.is_empty() {
            match test_categories.iter_mut().find(|c| c.name == test.test_category) {
                Some(existing) => existing.count += 1,
                None => test_categories.push(CategoryCount {
                    name: test.test_category.clone(),
                    count: 1,
                }),
            }
        }

        if let Some(date) = test.test_date.as_deref().and_then(parse_timestamp) {
            if date.date() == day_start.date() {
                today_tests += 1;
            }
            if date >= week_start {
                this_week_tests += 1;
            }
            for bucket in monthly_trends.iter_mut() {
                if date.year() == bucket.year && date.month() == bucket.month {
                    bucket.count += 1;
                    break;
                }
            }
        }

        // Dashboard-level quality tally recognizes plain numeric
        // intervals only; bound and categorical ranges are excluded
        // here even though the report evaluator handles them.
        if !test.test_value.is_empty() && !test.normal_range.is_empty() {
            if let ReferenceRange::Interval { low, high } = parse_range(&test.normal_range) {
                if let Ok(value) = test.test_value.trim().parse::<f64>() {
                    if value < low || value > high {
                        abnormal_results += 1;
                    } else {
                        normal_results += 1;
                    }
                }
            }
        }
    }

    let report_completion_rate = if tests.is_empty() {
        0
    } else {
        (report_count as f64 / tests.len() as f64 * 100.0).round() as i32
    };

    StatisticsSummary {
        total_patients: patients.len() as u32,
        this_month_patients,
        total_tests: tests.len() as u32,
        today_tests,
        this_week_tests,
        gender_counts,
        age_groups,
        test_categories,
        normal_results,
        abnormal_results,
        reports_generated: report_count,
        report_completion_rate,
        monthly_trends,
        recent_activity: merge_activity(patients, tests, recent_reports, ANALYTICS_ACTIVITY_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        // Tuesday, 2026-08-25.
        NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    fn patient(id: i64, age: &str, gender: &str, created_at: Option<&str>) -> Patient {
        Patient {
            id,
            full_name: format!("Patient {id}"),
            age: age.into(),
            gender: gender.into(),
            contact_number: String::new(),
            email: None,
            patient_code: format!("PAT{id:06}"),
            address: None,
            ref_by: None,
            created_at: created_at.map(String::from),
        }
    }

    fn test_on(category: &str, date: &str, value: &str, range: &str) -> TestResult {
        TestResult {
            id: None,
            patient_id: Some(1),
            test_name: "T".into(),
            test_category: category.into(),
            test_subcategory: "S".into(),
            test_value: value.into(),
            normal_range: range.into(),
            unit: String::new(),
            additional_note: None,
            test_date: Some(date.into()),
        }
    }

    #[test]
    fn gender_tally_case_insensitive_with_other() {
        let patients = vec![
            patient(1, "30", "Male", None),
            patient(2, "30", "FEMALE", None),
            patient(3, "30", "female", None),
            patient(4, "30", "nonbinary", None),
        ];
        let summary = build_statistics(&patients, &[], 0, &[], now());
        assert_eq!(summary.gender_counts, GenderCounts { male: 1, female: 2, other: 1 });
        let total = summary.gender_counts.male
            + summary.gender_counts.female
            + summary.gender_counts.other;
        assert_eq!(total, patients.len() as u32);
    }

    #[test]
    fn age_bucketing_first_match_and_silent_drop() {
        let patients = vec![
            patient(1, "0", "male", None),
            patient(2, "17", "male", None),
            patient(3, "18", "male", None),
            patient(4, "64", "male", None),
            patient(5, "200", "male", None),
            patient(6, "201", "male", None),
            patient(7, "-1", "male", None),
            patient(8, "unknown", "male", None),
        ];
        let summary = build_statistics(&patients, &[], 0, &[], now());
        let counts: Vec<u32> = summary.age_groups.iter().map(|g| g.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 0, 2]);
        // 201, -1 and "unknown" are dropped, not clamped.
        assert_eq!(counts.iter().sum::<u32>(), 5);
    }

    #[test]
    fn time_window_counts() {
        let tests = vec![
            test_on("Hematology", "2026-08-25 09:00:00", "", ""), // today
            test_on("Hematology", "2026-08-24 09:00:00", "", ""), // this week (Sun 23rd start)
            test_on("Hematology", "2026-08-22 09:00:00", "", ""), // last week
            test_on("Hematology", "2026-03-01 09:00:00", "", ""), // this 6-month window
            test_on("Hematology", "2026-02-01 09:00:00", "", ""), // outside window
        ];
        let patients = vec![
            patient(1, "30", "male", Some("2026-08-03 08:00:00")),
            patient(2, "30", "male", Some("2026-07-31 08:00:00")),
        ];
        let summary = build_statistics(&patients, &tests, 0, &[], now());
        assert_eq!(summary.today_tests, 1);
        assert_eq!(summary.this_week_tests, 2);
        assert_eq!(summary.this_month_patients, 1);

        assert_eq!(summary.monthly_trends.len(), 6);
        assert_eq!(summary.monthly_trends[0].label, "Mar 2026");
        assert_eq!(summary.monthly_trends[0].count, 1);
        assert_eq!(summary.monthly_trends[5].label, "Aug 2026");
        assert_eq!(summary.monthly_trends[5].count, 3);
        let bucketed: u32 = summary.monthly_trends.iter().map(|m| m.count).sum();
        assert_eq!(bucketed, 4); // February test ignored
    }

    #[test]
    fn category_tally_first_seen_order_skips_missing() {
        let tests = vec![
            test_on("Serology", "2026-08-01", "", ""),
            test_on("Hematology", "2026-08-01", "", ""),
            test_on("Serology", "2026-08-01", "", ""),
            test_on("", "2026-08-01", "", ""),
        ];
        let summary = build_statistics(&[], &tests, 0, &[], now());
        let names: Vec<&str> = summary.test_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Serology", "Hematology"]);
        assert_eq!(summary.test_categories[0].count, 2);
        assert_eq!(summary.test_categories[1].count, 1);
    }

    #[test]
    fn interval_only_tally_ignores_bound_ranges() {
        // Known divergence from the report evaluator: "<1.1" and
        // "Negative/Positive" are not counted at the dashboard level.
        let tests = vec![
            test_on("Biochem", "2026-08-01", "95", "70-110"),   // normal
            test_on("Biochem", "2026-08-01", "120", "70-110"),  // abnormal
            test_on("Biochem", "2026-08-01", "2.0", "<1.1"),    // excluded
            test_on("Serology", "2026-08-01", "Positive", "Negative/Positive"), // excluded
            test_on("Biochem", "2026-08-01", "trace", "70-110"), // non-numeric value excluded
        ];
        let summary = build_statistics(&[], &tests, 0, &[], now());
        assert_eq!(summary.normal_results, 1);
        assert_eq!(summary.abnormal_results, 1);
    }

    #[test]
    fn zero_value_is_still_evaluated() {
        let tests = vec![test_on("Biochem", "2026-08-01", "0", "70-110")];
        let summary = build_statistics(&[], &tests, 0, &[], now());
        assert_eq!(summary.abnormal_results, 1);
    }

    #[test]
    fn completion_rate_zero_without_tests() {
        let summary = build_statistics(&[], &[], 5, &[], now());
        assert_eq!(summary.report_completion_rate, 0);
        assert_eq!(summary.reports_generated, 5);
    }

    #[test]
    fn completion_rate_rounds_and_is_unclamped() {
        let tests = vec![
            test_on("A", "2026-08-01", "", ""),
            test_on("A", "2026-08-01", "", ""),
            test_on("A", "2026-08-01", "", ""),
        ];
        let summary = build_statistics(&[], &tests, 1, &[], now());
        assert_eq!(summary.report_completion_rate, 33);

        let summary = build_statistics(&[], &tests, 6, &[], now());
        assert_eq!(summary.report_completion_rate, 200);
    }

    #[test]
    fn recent_activity_capped_at_ten() {
        let patients: Vec<Patient> = (1..=12)
            .map(|i| patient(i, "30", "male", Some(&format!("2026-08-{:02} 08:00:00", i))))
            .collect();
        let summary = build_statistics(&patients, &[], 0, &[], now());
        assert_eq!(summary.recent_activity.len(), 10);
    }
}
