use serde::{Deserialize, Serialize};

/// Total number of tracked reports (`/api/reports/count`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportCount {
    pub count: i64,
}

/// One row from `/api/reports/recent`.
///
/// The backend returns raw DB rows (snake_case) while older responses
/// used camelCase; aliases accept both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentReport {
    #[serde(alias = "patientName")]
    pub patient_name: String,
    #[serde(default, alias = "generatedAt")]
    pub generated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_wire_shapes() {
        let snake: RecentReport =
            serde_json::from_str(r#"{"patient_name": "A", "generated_at": "2026-08-01 08:00:00"}"#)
                .unwrap();
        let camel: RecentReport =
            serde_json::from_str(r#"{"patientName": "A", "generatedAt": "2026-08-01 08:00:00"}"#)
                .unwrap();
        assert_eq!(snake.patient_name, camel.patient_name);
        assert_eq!(snake.generated_at, camel.generated_at);
    }
}
