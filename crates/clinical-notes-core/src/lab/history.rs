//! Merging lab panels from historical records into per-test series.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{LabPanel, LabPoint, LabSeries};

use super::{closest_test_name, normalize_test_name};

/// Group results from many panels by normalized test name.
///
/// Series appear in first-seen order and keep the first spelling as their
/// display name. Points are ordered by collection date with undated panels
/// last; equal dates keep panel order. Rows with a blank test name are dropped.
pub fn merge_panels(panels: &[LabPanel]) -> Vec<LabSeries> {
    let mut series: Vec<LabSeries> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for panel in panels {
        for result in &panel.results {
            let key = normalize_test_name(&result.test_name);
            if key.is_empty() {
                tracing::debug!(source = ?panel.source, "skipping lab row without test name");
                continue;
            }

            let point = LabPoint {
                collected_on: panel.collected_on,
                source: panel.source.clone(),
                abnormal: result.is_abnormal(),
                result: result.clone(),
            };

            match index.get(&key) {
                Some(&i) => series[i].points.push(point),
                None => {
                    index.insert(key.clone(), series.len());
                    series.push(LabSeries {
                        display_name: result.test_name.trim().to_string(),
                        normalized_name: key,
                        points: vec![point],
                    });
                }
            }
        }
    }

    for s in &mut series {
        s.points.sort_by(|a, b| compare_dates(a.collected_on, b.collected_on));
    }

    series
}

fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Pairs of distinct series whose names look like spellings of one test.
///
/// Each series is compared against the ones before it; the pair is
/// `(earlier display name, later display name)`.
pub fn suggest_series_merges(series: &[LabSeries], min_similarity: f64) -> Vec<(String, String)> {
    let mut suggestions = Vec::new();

    for (i, current) in series.iter().enumerate().skip(1) {
        let earlier: Vec<&str> = series[..i].iter().map(|s| s.display_name.as_str()).collect();
        if let Some(found) = closest_test_name(&current.display_name, &earlier, min_similarity) {
            suggestions.push((found.to_string(), current.display_name.clone()));
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabResult;

    fn panel(date: Option<(i32, u32, u32)>, rows: &[(&str, &str, &str)]) -> LabPanel {
        let mut panel = LabPanel::new(date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)));
        panel.results = rows
            .iter()
            .map(|(name, value, range)| LabResult::new(*name, *value, *range))
            .collect();
        panel
    }

    #[test]
    fn test_merge_groups_by_normalized_name() {
        let panels = vec![
            panel(Some((2024, 5, 10)), &[("KREATİNİN", "1.5", "0.7 - 1.3"), ("Glukoz", "90", "70-100")]),
            panel(Some((2024, 1, 2)), &[("Kreatinin", "1.1", "0.7 - 1.3")]),
        ];

        let series = merge_panels(&panels);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].display_name, "KREATİNİN");
        assert_eq!(series[0].normalized_name, "kreatinin");
        assert_eq!(series[0].points.len(), 2);

        // Ordered by date, older first
        assert_eq!(series[0].points[0].result.value.as_deref(), Some("1.1"));
        assert!(!series[0].points[0].abnormal);
        assert!(series[0].points[1].abnormal);
        assert_eq!(series[0].abnormal_count(), 1);
    }

    #[test]
    fn test_undated_panels_sort_last() {
        let panels = vec![
            panel(None, &[("Hb", "10", "12-16")]),
            panel(Some((2023, 7, 1)), &[("HB", "13", "12-16")]),
        ];

        let series = merge_panels(&panels);

        assert_eq!(series.len(), 1);
        assert!(series[0].points[0].collected_on.is_some());
        assert!(series[0].points[1].collected_on.is_none());
        assert_eq!(series[0].latest().and_then(|p| p.result.value.as_deref()), Some("13"));
    }

    #[test]
    fn test_blank_names_dropped() {
        let panels = vec![panel(None, &[("  ", "5", "1-10")])];
        assert!(merge_panels(&panels).is_empty());
    }

    #[test]
    fn test_suggest_series_merges() {
        let panels = vec![panel(
            None,
            &[("Kreatinin", "1", "0.7-1.3"), ("Kreatinin (serum)", "1", "0.7-1.3"), ("TSH", "2", "0.4-4")],
        )];
        let series = merge_panels(&panels);

        let suggestions = suggest_series_merges(&series, 0.7);
        assert_eq!(
            suggestions,
            vec![("Kreatinin".to_string(), "Kreatinin (serum)".to_string())]
        );
    }
}
