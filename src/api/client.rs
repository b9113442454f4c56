use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::DEFAULT_API_BASE_URL;
use crate::models::{
    LabInfo, NewPatient, NewRefDoctor, NewTestResult, Patient, RecentReport, RefDoctor,
    ReportCount, TestResult,
};
use crate::report::{assemble_report, ReportDocument};

use super::ApiError;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Blocking HTTP client for the laboratory backend. One instance per
/// session; the bearer token set by a successful login is attached to
/// every subsequent request.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
    token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LatestCodeResponse {
    code: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    /// Client against the development backend.
    pub fn default_local() -> Result<Self, ApiError> {
        Self::new(DEFAULT_API_BASE_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // ─── Session ───

    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { email, password };
        let response: LoginResponse = self.post("login", &body)?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    // ─── Patients ───

    pub fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get("patients")
    }

    pub fn get_patient(&self, id: i64) -> Result<Patient, ApiError> {
        self.get(&format!("patients/{id}"))
    }

    pub fn create_patient(&self, patient: &NewPatient) -> Result<Patient, ApiError> {
        self.post("patients", patient)
    }

    pub fn update_patient(&self, id: i64, patient: &NewPatient) -> Result<Patient, ApiError> {
        self.put(&format!("patients/{id}"), patient)
    }

    pub fn delete_patient(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("patients/{id}"))
    }

    /// Next sequential code, e.g. "PAT000042".
    pub fn latest_patient_code(&self) -> Result<String, ApiError> {
        let response: LatestCodeResponse = self.get("patients/latest-code")?;
        Ok(response.code)
    }

    // ─── Tests ───

    pub fn list_tests(&self) -> Result<Vec<TestResult>, ApiError> {
        self.get("tests")
    }

    /// Tests for one patient, optionally windowed by inclusive
    /// YYYY-MM-DD bounds.
    pub fn patient_tests(
        &self,
        patient_id: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<TestResult>, ApiError> {
        let mut path = format!("tests?patient_id={patient_id}");
        if let Some(start) = start_date {
            path.push_str(&format!("&start_date={start}"));
        }
        if let Some(end) = end_date {
            path.push_str(&format!("&end_date={end}"));
        }
        self.get(&path)
    }

    pub fn create_test(&self, test: &NewTestResult) -> Result<TestResult, ApiError> {
        self.post("tests", test)
    }

    pub fn update_test(&self, id: i64, test: &NewTestResult) -> Result<TestResult, ApiError> {
        self.put(&format!("tests/{id}"), test)
    }

    pub fn delete_test(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("tests/{id}"))
    }

    // ─── Lab profile and doctors ───

    pub fn lab_info(&self) -> Result<LabInfo, ApiError> {
        self.get("lab-info")
    }

    pub fn update_lab_info(&self, info: &LabInfo) -> Result<LabInfo, ApiError> {
        self.put("lab-info", info)
    }

    pub fn list_ref_doctors(&self) -> Result<Vec<RefDoctor>, ApiError> {
        self.get("ref-doctors")
    }

    pub fn create_ref_doctor(&self, doctor: &NewRefDoctor) -> Result<RefDoctor, ApiError> {
        self.post("ref-doctors", doctor)
    }

    pub fn update_ref_doctor(&self, id: i64, doctor: &NewRefDoctor) -> Result<RefDoctor, ApiError> {
        self.put(&format!("ref-doctors/{id}"), doctor)
    }

    pub fn delete_ref_doctor(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("ref-doctors/{id}"))
    }

    // ─── Reports ───

    pub fn report_count(&self) -> Result<i64, ApiError> {
        let response: ReportCount = self.get("reports/count")?;
        Ok(response.count)
    }

    pub fn recent_reports(&self) -> Result<Vec<RecentReport>, ApiError> {
        self.get("reports/recent")
    }

    /// Records that a report was generated for this patient.
    pub fn track_report(&self, patient_id: i64) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post("reports/track", &json!({ "patientId": patient_id }))?;
        Ok(())
    }

    /// Fetches everything a printed report needs and assembles the
    /// document. Tracking is left to the caller so previews do not
    /// inflate the report count.
    pub fn generate_report(
        &self,
        patient_id: i64,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<ReportDocument, ApiError> {
        let patient = self.get_patient(patient_id)?;
        let lab = self.lab_info()?;
        let tests = self.patient_tests(patient_id, start_date, end_date)?;
        debug!(patient_id, tests = tests.len(), "assembling report");
        Ok(assemble_report(
            &patient,
            &lab,
            tests,
            chrono::Local::now().naive_local(),
        ))
    }

    // ─── Plumbing ───

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorize(self.client.get(self.url(path)));
        Self::handle(request.send().map_err(|e| self.map_transport(e))?)
    }

    fn post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.post(self.url(path))).json(body);
        Self::handle(request.send().map_err(|e| self.map_transport(e))?)
    }

    fn put<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.put(self.url(path))).json(body);
        Self::handle(request.send().map_err(|e| self.map_transport(e))?)
    }

    fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorize(self.client.delete(self.url(path)));
        let response = request.send().map_err(|e| self.map_transport(e))?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Api { status: status.as_u16(), message });
        }
        Ok(())
    }

    fn handle<T: serde::de::DeserializeOwned>(
        response: reqwest::blocking::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Api { status: status.as_u16(), message });
        }
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_transport(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(REQUEST_TIMEOUT_SECS)
        } else {
            ApiError::Http(e.to_string())
        }
    }
}
