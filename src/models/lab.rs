use serde::{Deserialize, Serialize};

/// Laboratory identity printed on every report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub slogan: Option<String>,
}
