//! Client-side progress aggregation.
//!
//! Pure derivations over scored answers for dashboards: monthly trend
//! series, per-category and per-subcategory averages, and chart
//! coordinates. Only answers that carry a score participate.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::types::Answer;

/// One aggregation bucket: a month, category, or subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedPerformance {
    pub key: String,
    /// Mean score rounded to one decimal place.
    pub average_score: f64,
    pub count: usize,
}

/// Normalize a feedback list.
///
/// The backend stores JSON arrays, but older rows carry a single
/// newline-separated string with bullet prefixes; both forms normalize
/// to a plain list of trimmed lines.
pub fn parse_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect(),
        Value::String(text) => text
            .lines()
            .map(|line| line.trim_start_matches(['-', '•', '*']).trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of raw scores, rounded to one decimal place. Empty input is 0.
pub fn average_score(scores: &[u32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u32 = scores.iter().sum();
    round1(f64::from(sum) / scores.len() as f64)
}

fn grouped(buckets: BTreeMap<String, Vec<u32>>) -> Vec<GroupedPerformance> {
    buckets
        .into_iter()
        .map(|(key, scores)| GroupedPerformance {
            average_score: average_score(&scores),
            count: scores.len(),
            key,
        })
        .collect()
}

/// Month key (`YYYY-MM`) from an RFC 3339 timestamp.
fn month_of(created_at: &str) -> Option<&str> {
    created_at.get(..7).filter(|m| m.len() == 7)
}

/// Scored answers grouped by month, ascending, optionally filtered by
/// category and subcategory.
pub fn performance_over_time(
    answers: &[Answer],
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Vec<GroupedPerformance> {
    let mut buckets: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for answer in answers {
        let Some(score) = answer.score else { continue };
        if category.is_some_and(|c| answer.question.category != c) {
            continue;
        }
        if subcategory.is_some_and(|s| answer.question.subcategory != s) {
            continue;
        }
        let Some(month) = month_of(&answer.created_at) else {
            continue;
        };
        buckets.entry(month.to_string()).or_default().push(score);
    }
    grouped(buckets)
}

/// Scored answers grouped by question category.
pub fn performance_by_category(answers: &[Answer]) -> Vec<GroupedPerformance> {
    let mut buckets: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for answer in answers {
        let Some(score) = answer.score else { continue };
        buckets
            .entry(answer.question.category.clone())
            .or_default()
            .push(score);
    }
    grouped(buckets)
}

/// Scored answers grouped by subcategory, optionally restricted to one
/// category.
pub fn performance_by_subcategory(
    answers: &[Answer],
    category: Option<&str>,
) -> Vec<GroupedPerformance> {
    let mut buckets: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for answer in answers {
        let Some(score) = answer.score else { continue };
        if category.is_some_and(|c| answer.question.category != c) {
            continue;
        }
        buckets
            .entry(answer.question.subcategory.clone())
            .or_default()
            .push(score);
    }
    grouped(buckets)
}

/// Map a month series to `(x, y)` chart coordinates on a canvas of the
/// given size. Months spread evenly over the width; y scales scores
/// 0–100 with the origin at the bottom.
pub fn trend_points(series: &[GroupedPerformance], width: f64, height: f64) -> Vec<(f64, f64)> {
    let step = if series.len() > 1 {
        width / (series.len() - 1) as f64
    } else {
        0.0
    };
    series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = if series.len() == 1 {
                width / 2.0
            } else {
                step * i as f64
            };
            let y = height * (1.0 - (point.average_score / 100.0).clamp(0.0, 1.0));
            (x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Question;
    use serde_json::json;

    fn answer(score: Option<u32>, category: &str, subcategory: &str, created_at: &str) -> Answer {
        Answer {
            id: 1,
            question: Question {
                id: 1,
                question: "Walk me through a DCF.".to_string(),
                difficulty: "Medium".to_string(),
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            },
            answer: "…".to_string(),
            strengths: json!([]),
            weaknesses: json!([]),
            score,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn parse_list_accepts_arrays_and_bulleted_strings() {
        assert_eq!(
            parse_list(&json!(["clear structure", "good pacing"])),
            vec!["clear structure", "good pacing"]
        );
        assert_eq!(
            parse_list(&json!("- first\n• second\n\n* third")),
            vec!["first", "second", "third"]
        );
        assert!(parse_list(&json!(null)).is_empty());
        assert!(parse_list(&json!(42)).is_empty());
    }

    #[test]
    fn averages_round_to_one_decimal() {
        assert_eq!(average_score(&[70, 75]), 72.5);
        assert_eq!(average_score(&[70, 75, 77]), 74.0);
        assert_eq!(average_score(&[]), 0.0);
    }

    #[test]
    fn monthly_grouping_sorts_and_skips_unscored() {
        let answers = vec![
            answer(Some(80), "Consulting", "Case", "2025-03-14T10:00:00Z"),
            answer(Some(60), "Consulting", "Case", "2025-03-20T10:00:00Z"),
            answer(Some(90), "Consulting", "Case", "2025-01-02T10:00:00Z"),
            answer(None, "Consulting", "Case", "2025-03-25T10:00:00Z"),
        ];
        let series = performance_over_time(&answers, None, None);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key, "2025-01");
        assert_eq!(series[0].average_score, 90.0);
        assert_eq!(series[1].key, "2025-03");
        assert_eq!(series[1].average_score, 70.0);
        assert_eq!(series[1].count, 2);
    }

    #[test]
    fn filters_restrict_the_series() {
        let answers = vec![
            answer(Some(80), "Consulting", "Case", "2025-03-14T10:00:00Z"),
            answer(Some(40), "Investment Banking", "Financial", "2025-03-15T10:00:00Z"),
        ];
        let series = performance_over_time(&answers, Some("Consulting"), None);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].average_score, 80.0);

        let none = performance_over_time(&answers, Some("Consulting"), Some("Behavioral"));
        assert!(none.is_empty());
    }

    #[test]
    fn category_and_subcategory_grouping() {
        let answers = vec![
            answer(Some(80), "Consulting", "Case", "2025-03-14T10:00:00Z"),
            answer(Some(60), "Consulting", "Behavioral", "2025-03-15T10:00:00Z"),
            answer(Some(40), "Investment Banking", "Financial", "2025-03-16T10:00:00Z"),
        ];

        let by_category = performance_by_category(&answers);
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[0].key, "Consulting");
        assert_eq!(by_category[0].average_score, 70.0);

        let consulting = performance_by_subcategory(&answers, Some("Consulting"));
        assert_eq!(consulting.len(), 2);
        assert_eq!(consulting[0].key, "Behavioral");
    }

    #[test]
    fn trend_points_scale_to_the_canvas() {
        let series = vec![
            GroupedPerformance {
                key: "2025-01".to_string(),
                average_score: 100.0,
                count: 1,
            },
            GroupedPerformance {
                key: "2025-02".to_string(),
                average_score: 0.0,
                count: 1,
            },
            GroupedPerformance {
                key: "2025-03".to_string(),
                average_score: 50.0,
                count: 1,
            },
        ];
        let points = trend_points(&series, 200.0, 100.0);
        assert_eq!(points, vec![(0.0, 0.0), (100.0, 100.0), (200.0, 50.0)]);

        let single = trend_points(&series[..1], 200.0, 100.0);
        assert_eq!(single, vec![(100.0, 0.0)]);
    }
}
