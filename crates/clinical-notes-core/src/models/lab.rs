//! Lab result models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single reported lab result row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResult {
    /// Test name as printed on the report (e.g., "KREATİNİN")
    pub test_name: String,
    /// Reported value, free text (e.g., "1,2", "< 0.5", "negatif")
    pub value: Option<String>,
    /// Unit as printed (e.g., "mg/dL")
    pub unit: Option<String>,
    /// Reference range text (e.g., "0.7 - 1.3", "<= 200")
    pub reference_range: Option<String>,
}

impl LabResult {
    /// Create a result with a value and reference range.
    pub fn new(test_name: impl Into<String>, value: impl Into<String>, reference_range: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            value: Some(value.into()),
            unit: None,
            reference_range: Some(reference_range.into()),
        }
    }

    /// Whether the value is provably outside its reference range.
    ///
    /// `false` means "not proven abnormal", not "confirmed normal".
    pub fn is_abnormal(&self) -> bool {
        crate::lab::is_result_abnormal(self.value.as_deref(), self.reference_range.as_deref())
    }
}

/// A set of results reported together (one lab report).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabPanel {
    /// Sample collection date, if known
    pub collected_on: Option<NaiveDate>,
    /// Reporting laboratory or document reference
    pub source: Option<String>,
    /// Result rows
    pub results: Vec<LabResult>,
}

impl LabPanel {
    /// Create an empty panel for a collection date.
    pub fn new(collected_on: Option<NaiveDate>) -> Self {
        Self {
            collected_on,
            source: None,
            results: Vec::new(),
        }
    }
}

/// Parsed shape of a reference range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ReferenceRange {
    /// `low - high`, both bounds normal
    Between { low: f64, high: f64 },
    /// `< limit` or `<= limit`
    Below { limit: f64, inclusive: bool },
    /// `> limit` or `>= limit`
    Above { limit: f64, inclusive: bool },
}

/// One observation of a test inside a merged series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabPoint {
    pub collected_on: Option<NaiveDate>,
    pub source: Option<String>,
    pub result: LabResult,
    pub abnormal: bool,
}

/// All observations of one test across panels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabSeries {
    /// Display name (first spelling seen)
    pub display_name: String,
    /// Normalized key shared by every point
    pub normalized_name: String,
    /// Points ordered by collection date, undated last
    pub points: Vec<LabPoint>,
}

impl LabSeries {
    /// Most recent dated point, falling back to the last undated one.
    pub fn latest(&self) -> Option<&LabPoint> {
        self.points
            .iter()
            .rev()
            .find(|p| p.collected_on.is_some())
            .or_else(|| self.points.last())
    }

    /// Number of points flagged abnormal.
    pub fn abnormal_count(&self) -> usize {
        self.points.iter().filter(|p| p.abnormal).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lab_result_is_abnormal() {
        assert!(LabResult::new("Glukoz", "140", "70 - 100").is_abnormal());
        assert!(!LabResult::new("Glukoz", "90", "70 - 100").is_abnormal());

        let missing = LabResult {
            test_name: "Glukoz".into(),
            value: None,
            unit: Some("mg/dL".into()),
            reference_range: Some("70 - 100".into()),
        };
        assert!(!missing.is_abnormal());
    }

    #[test]
    fn test_reference_range_serde_shape() {
        let range = ReferenceRange::Below { limit: 5.0, inclusive: true };
        let json = serde_json::to_string(&range).unwrap();
        assert!(json.contains("\"shape\":\"below\""));

        let back: ReferenceRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_series_latest_prefers_dated() {
        let dated = LabPoint {
            collected_on: NaiveDate::from_ymd_opt(2024, 3, 1),
            source: None,
            result: LabResult::new("Hb", "13", "12 - 16"),
            abnormal: false,
        };
        let undated = LabPoint {
            collected_on: None,
            source: None,
            result: LabResult::new("Hb", "11", "12 - 16"),
            abnormal: true,
        };
        let series = LabSeries {
            display_name: "Hb".into(),
            normalized_name: "hb".into(),
            points: vec![dated.clone(), undated],
        };

        assert_eq!(series.latest(), Some(&dated));
        assert_eq!(series.abnormal_count(), 1);
    }
}
