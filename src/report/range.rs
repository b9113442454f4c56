use std::sync::OnceLock;

use regex::Regex;

/// A reference range parsed from the free-text `normal_range` column.
///
/// Derived fresh on every evaluation; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceRange {
    /// "70-110" (or with an en-dash): both bounds inclusive-normal.
    Interval { low: f64, high: f64 },
    /// "<1.1": values at or above the bound are High.
    UpperBound { high: f64 },
    /// ">5": values at or below the bound are Low.
    LowerBound { low: f64 },
    /// "Negative/Positive" style qualitative range.
    Categorical,
    /// Anything the patterns above do not recognize.
    Unparseable,
}

fn interval_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)?)-(\d+(?:\.\d+)?)$").expect("valid regex"))
}

/// Parses a reference-range string. Total: every input maps to exactly
/// one variant, malformed input degrades to `Unparseable`.
///
/// Match priority: categorical, then numeric interval (after en-dash
/// normalization and whitespace stripping), then `<` / `>` bounds.
pub fn parse_range(raw: &str) -> ReferenceRange {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    if lower.contains("negative") && lower.contains("positive") {
        return ReferenceRange::Categorical;
    }

    let normalized: String = trimmed.replace('–', "-").split_whitespace().collect();

    if let Some(caps) = interval_re().captures(&normalized) {
        // The regex only admits valid numeric tokens, but parse failures
        // still fall through to Unparseable rather than panicking.
        match (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            (Ok(low), Ok(high)) => return ReferenceRange::Interval { low, high },
            _ => return ReferenceRange::Unparseable,
        }
    }

    if let Some(rest) = normalized.strip_prefix('<') {
        return match rest.parse::<f64>() {
            Ok(high) => ReferenceRange::UpperBound { high },
            Err(_) => ReferenceRange::Unparseable,
        };
    }

    if let Some(rest) = normalized.strip_prefix('>') {
        return match rest.parse::<f64>() {
            Ok(low) => ReferenceRange::LowerBound { low },
            Err(_) => ReferenceRange::Unparseable,
        };
    }

    ReferenceRange::Unparseable
}
