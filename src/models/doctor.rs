use serde::{Deserialize, Serialize};

/// A referring doctor from the `/api/ref-doctors` directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefDoctor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
}

/// Payload for adding or updating a referring doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRefDoctor {
    pub name: String,
    pub specialty: Option<String>,
    pub contact_number: Option<String>,
    pub hospital: Option<String>,
}
