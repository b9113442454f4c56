use serde::{Deserialize, Serialize};

/// Classification of an observed test value against its reference range.
///
/// `Raw` carries an unrecognized categorical value verbatim: unexpected
/// lab codes are surfaced on the report rather than silently normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Status {
    Low,
    High,
    Normal,
    Positive,
    Negative,
    Raw(String),
}

impl Status {
    /// Display label as printed in the report's STATUS column.
    pub fn label(&self) -> &str {
        match self {
            Status::Low => "Low",
            Status::High => "High",
            Status::Normal => "Normal",
            Status::Positive => "Positive",
            Status::Negative => "Negative",
            Status::Raw(value) => value,
        }
    }

    /// Whether the row is rendered in the abnormal (red) style.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Status::Low | Status::High | Status::Positive)
    }

    /// Directional marker appended to out-of-range numeric values.
    pub fn arrow(&self) -> Option<char> {
        match self {
            Status::Low => Some('↓'),
            Status::High => Some('↑'),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
