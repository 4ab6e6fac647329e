//! Reference-range parsing and out-of-range detection.
//!
//! Recognised reference shapes, checked in this order:
//! - contains `-`: bounded range `low - high` (both bounds normal)
//! - starts with `<`: upper bound, `<=` inclusive
//! - starts with `>`: lower bound, `>=` inclusive
//!
//! Numbers may use `,` or `.` as decimal separator and may be signed.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ReferenceRange;

/// First numeric literal: optional sign, ASCII digits, optional fraction.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9]+(?:\.[0-9]+)?").expect("Invalid number regex"));

/// Trim and switch the decimal comma to a dot.
fn clean(text: &str) -> String {
    text.trim().replace(',', ".")
}

fn first_number(cleaned: &str) -> Option<f64> {
    NUMBER_PATTERN.find(cleaned)?.as_str().parse().ok()
}

/// Extract the first numeric literal from free text.
///
/// ```
/// use clinical_notes_core::lab::extract_number;
///
/// assert_eq!(extract_number(" 1,25 mg/dL"), Some(1.25));
/// assert_eq!(extract_number("negatif"), None);
/// ```
pub fn extract_number(text: &str) -> Option<f64> {
    first_number(&clean(text))
}

impl ReferenceRange {
    /// Parse reference-range text into one of the recognised shapes.
    ///
    /// Once a hyphen is present only the bounded shape is tried; it must
    /// split into exactly two parts, each holding a number.
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned = clean(text);
        if cleaned.is_empty() {
            return None;
        }

        if cleaned.contains('-') {
            let parts: Vec<&str> = cleaned.split('-').collect();
            if parts.len() != 2 {
                tracing::debug!(reference = %text, parts = parts.len(), "bounded range does not split in two");
                return None;
            }
            let (Some(low), Some(high)) = (first_number(parts[0]), first_number(parts[1])) else {
                tracing::debug!(reference = %text, "bounded range side is not numeric");
                return None;
            };
            return Some(Self::Between { low, high });
        }

        let inclusive = cleaned.contains('=');
        if let Some(rest) = cleaned.strip_prefix('<') {
            return first_number(rest).map(|limit| Self::Below { limit, inclusive });
        }
        if let Some(rest) = cleaned.strip_prefix('>') {
            return first_number(rest).map(|limit| Self::Above { limit, inclusive });
        }

        tracing::debug!(reference = %text, "unrecognised reference range shape");
        None
    }

    /// Whether `value` falls outside the normal interval.
    pub fn is_outside(&self, value: f64) -> bool {
        match *self {
            Self::Between { low, high } => value < low || value > high,
            Self::Below { limit, inclusive: true } => value > limit,
            Self::Below { limit, inclusive: false } => value >= limit,
            Self::Above { limit, inclusive: true } => value < limit,
            Self::Above { limit, inclusive: false } => value <= limit,
        }
    }
}

/// Whether a reported value lies outside its reference range.
///
/// Missing input, a value without a number, or a reference range of an
/// unrecognised shape all yield `false`. A `false` result therefore means
/// "not proven abnormal", never "confirmed normal".
pub fn is_result_abnormal(value: Option<&str>, reference: Option<&str>) -> bool {
    let (Some(value), Some(reference)) = (value, reference) else {
        return false;
    };
    if value.is_empty() || reference.is_empty() {
        return false;
    }

    let Some(number) = extract_number(value) else {
        tracing::trace!(value, "reported value is not numeric");
        return false;
    };

    ReferenceRange::parse(reference)
        .map(|range| range.is_outside(number))
        .unwrap_or(false)
}
