use serde::{Deserialize, Deserializer, Serialize};

/// A registered patient as returned by `/api/patients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub full_name: String,
    /// The backend stores age as free text; some rows carry bare integers.
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    pub gender: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub patient_code: String,
    #[serde(default)]
    pub address: Option<String>,
    /// Referring doctor, empty string when unset.
    #[serde(default)]
    pub ref_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for creating or updating a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub full_name: String,
    pub age: String,
    pub gender: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub ref_by: Option<String>,
}

/// Accepts both `"42"` and `42` on the wire.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    })
}
