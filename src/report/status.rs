use crate::models::Status;

use super::range::ReferenceRange;

/// Classifies an observed value against a parsed reference range.
///
/// Total function: any (value, range) pair resolves to some `Status`.
/// Biased toward `Normal` on parse failure: an abnormality flag is
/// never asserted from ambiguous input on a medical report.
pub fn evaluate_status(value: &str, range: &ReferenceRange) -> Status {
    match range {
        ReferenceRange::Categorical => match value.trim().to_lowercase().as_str() {
            "negative" => Status::Negative,
            "positive" => Status::Positive,
            // Unexpected lab codes pass through verbatim so they stay
            // visible; do not collapse them to Normal.
            _ => Status::Raw(value.to_string()),
        },
        ReferenceRange::Interval { low, high } => match value.trim().parse::<f64>() {
            Ok(num) if num < *low => Status::Low,
            Ok(num) if num > *high => Status::High,
            Ok(_) => Status::Normal,
            Err(_) => Status::Normal,
        },
        ReferenceRange::UpperBound { high } => match value.trim().parse::<f64>() {
            Ok(num) if num >= *high => Status::High,
            _ => Status::Normal,
        },
        ReferenceRange::LowerBound { low } => match value.trim().parse::<f64>() {
            Ok(num) if num <= *low => Status::Low,
            _ => Status::Normal,
        },
        ReferenceRange::Unparseable => Status::Normal,
    }
}
