use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{LabInfo, Patient, Status, TestResult};

use super::grouping::group_results;
use super::range::parse_range;
use super::status::evaluate_status;

/// A fully assembled report, ready for rendering. Built once per
/// request, read-only thereafter, discarded after render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    pub patient_name: String,
    pub patient_code: String,
    pub patient_age: String,
    pub patient_gender: String,
    pub contact_number: String,
    /// Referring doctor; rendered as "-" when absent.
    pub ref_by: Option<String>,
    pub lab: LabInfo,
    /// Captured once at assembly; used for both the printed report
    /// date/time and the tracking record.
    pub generated_at: NaiveDateTime,
    pub categories: Vec<ReportCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCategory {
    pub name: String,
    pub subcategories: Vec<ReportSubcategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubcategory {
    pub name: String,
    pub rows: Vec<ReportRow>,
}

/// One table row: the source result plus its computed status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub test: TestResult,
    pub status: Status,
}

impl ReportDocument {
    pub fn total_rows(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.subcategories)
            .map(|s| s.rows.len())
            .sum()
    }
}

/// Combines patient identity, lab identity and evaluated test results
/// into a single document. Pure data transformation: grouping and
/// status evaluation happen here, rendering is the caller's concern.
pub fn assemble_report(
    patient: &Patient,
    lab: &LabInfo,
    results: Vec<TestResult>,
    now: NaiveDateTime,
) -> ReportDocument {
    let grouped = group_results(results);

    let categories = grouped
        .categories
        .into_iter()
        .map(|category| ReportCategory {
            name: category.name,
            subcategories: category
                .subcategories
                .into_iter()
                .map(|sub| ReportSubcategory {
                    name: sub.name,
                    rows: sub
                        .results
                        .into_iter()
                        .map(|test| {
                            let status =
                                evaluate_status(&test.test_value, &parse_range(&test.normal_range));
                            ReportRow { test, status }
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    ReportDocument {
        patient_name: patient.full_name.clone(),
        patient_code: patient.patient_code.clone(),
        patient_age: patient.age.clone(),
        patient_gender: patient.gender.clone(),
        contact_number: patient.contact_number.clone(),
        ref_by: patient.ref_by.clone().filter(|r| !r.is_empty()),
        lab: lab.clone(),
        generated_at: now,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn patient() -> Patient {
        Patient {
            id: 1,
            full_name: "Jane Doe".into(),
            age: "34".into(),
            gender: "Female".into(),
            contact_number: "555-0101".into(),
            email: None,
            patient_code: "PAT000007".into(),
            address: None,
            ref_by: Some("Dr. Chen".into()),
            created_at: None,
        }
    }

    fn lab() -> LabInfo {
        LabInfo {
            name: "City Lab".into(),
            address: "12 Main St".into(),
            phone: "555-0100".into(),
            email: Some("lab@example.com".into()),
            slogan: Some("Accurate. Fast.".into()),
        }
    }

    fn test_result(category: &str, sub: &str, name: &str, value: &str, range: &str) -> TestResult {
        TestResult {
            id: None,
            patient_id: Some(1),
            test_name: name.into(),
            test_category: category.into(),
            test_subcategory: sub.into(),
            test_value: value.into(),
            normal_range: range.into(),
            unit: "mg/dL".into(),
            additional_note: None,
            test_date: Some("2026-08-10 09:00:00".into()),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 25)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn assembles_grouped_rows_with_status() {
        let results = vec![
            test_result("Biochemistry", "Sugar", "Glucose (F)", "120", "70-110"),
            test_result("Biochemistry", "Sugar", "Glucose (PP)", "95", "70-110"),
            test_result("Serology", "Widal", "Typhi O", "Negative", "Negative/Positive"),
        ];

        let doc = assemble_report(&patient(), &lab(), results, now());

        assert_eq!(doc.total_rows(), 3);
        assert_eq!(doc.categories.len(), 2);
        let sugar = &doc.categories[0].subcategories[0];
        assert_eq!(sugar.rows[0].status, Status::High);
        assert_eq!(sugar.rows[1].status, Status::Normal);
        let widal = &doc.categories[1].subcategories[0];
        assert_eq!(widal.rows[0].status, Status::Negative);
    }

    #[test]
    fn carries_identity_and_timestamp() {
        let doc = assemble_report(&patient(), &lab(), vec![], now());
        assert_eq!(doc.patient_name, "Jane Doe");
        assert_eq!(doc.patient_code, "PAT000007");
        assert_eq!(doc.lab.name, "City Lab");
        assert_eq!(doc.ref_by.as_deref(), Some("Dr. Chen"));
        assert_eq!(doc.generated_at, now());
        assert!(doc.categories.is_empty());
    }

    #[test]
    fn empty_ref_by_becomes_none() {
        let mut p = patient();
        p.ref_by = Some(String::new());
        let doc = assemble_report(&p, &lab(), vec![], now());
        assert!(doc.ref_by.is_none());
    }
}
