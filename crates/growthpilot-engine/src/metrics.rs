// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric aggregation: raw records in, AI-consumable summaries out.
//!
//! Pure and total -- no failure mode. Output order matches input order
//! (the record store hands records most-recent-first; no re-sort here).

use chrono::{DateTime, Utc};
use growthpilot_core::PerformanceRecord;
use serde::Serialize;

/// Maximum characters of body text carried into a summary preview.
const PREVIEW_MAX_CHARS: usize = 50;

/// Compact, serializable view of one record for prompt embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Truncated body text.
    pub preview: String,
    /// Whether the record carries a visual attachment.
    pub has_visual: bool,
    /// When the content was posted.
    pub posted_at: DateTime<Utc>,
    /// Weighted engagement score.
    pub engagement: f64,
}

/// The fixed engagement score formula: `likes + 2*comments + views/100`.
///
/// Computed in floating point; a record with only views contributes a
/// fractional score.
pub fn engagement_score(views: u64, likes: u64, comments: u64) -> f64 {
    likes as f64 + 2.0 * comments as f64 + views as f64 / 100.0
}

/// Summarizes records into the parallel sequence of metric summaries.
pub fn summarize(records: &[PerformanceRecord]) -> Vec<MetricSummary> {
    records
        .iter()
        .map(|r| MetricSummary {
            preview: preview(&r.body),
            has_visual: r.has_visual(),
            posted_at: r.posted_at,
            engagement: engagement_score(r.views, r.likes, r.comments),
        })
        .collect()
}

/// Char-boundary-safe preview with trailing ellipsis.
pub(crate) fn preview(body: &str) -> String {
    let truncated: String = body.chars().take(PREVIEW_MAX_CHARS).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use growthpilot_core::types::{OwnerId, RecordId};
    use proptest::prelude::*;

    fn record(body: &str, views: u64, likes: u64, comments: u64) -> PerformanceRecord {
        PerformanceRecord {
            id: RecordId("r1".into()),
            owner: OwnerId("owner-1".into()),
            body: body.to_string(),
            image_url: None,
            views,
            likes,
            comments,
            posted_at: "2026-03-01T09:00:00Z".parse().unwrap(),
            created_at: 1,
        }
    }

    #[test]
    fn score_weights_are_exact() {
        assert_eq!(engagement_score(0, 0, 0), 0.0);
        assert_eq!(engagement_score(0, 10, 0), 10.0);
        assert_eq!(engagement_score(0, 0, 5), 10.0);
        assert_eq!(engagement_score(200, 0, 0), 2.0);
        assert_eq!(engagement_score(100, 3, 2), 3.0 + 4.0 + 1.0);
    }

    #[test]
    fn views_only_record_scores_fractionally() {
        assert_eq!(engagement_score(50, 0, 0), 0.5);
        assert_eq!(engagement_score(1, 0, 0), 0.01);
    }

    #[test]
    fn summaries_parallel_the_input_order() {
        let records = vec![
            record("first", 100, 1, 0),
            record("second", 0, 2, 0),
            record("third", 0, 0, 3),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].preview, "first...");
        assert_eq!(summaries[1].preview, "second...");
        assert_eq!(summaries[2].preview, "third...");
        assert_eq!(summaries[0].engagement, 2.0);
        assert_eq!(summaries[1].engagement, 2.0);
        assert_eq!(summaries[2].engagement, 6.0);
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "x".repeat(120);
        let p = preview(&body);
        assert_eq!(p.chars().count(), 53);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn preview_is_char_boundary_safe() {
        let body = "é".repeat(60);
        let p = preview(&body);
        assert_eq!(p.chars().count(), 53);
    }

    #[test]
    fn summary_detects_visuals() {
        let mut with_visual = record("has image", 0, 0, 0);
        with_visual.image_url = Some("https://cdn.example/a.png".into());
        let summaries = summarize(&[with_visual, record("no image", 0, 0, 0)]);
        assert!(summaries[0].has_visual);
        assert!(!summaries[1].has_visual);
    }

    #[test]
    fn summary_serializes_for_prompt_embedding() {
        let summaries = summarize(&[record("hello world", 100, 3, 2)]);
        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json[0]["preview"], "hello world...");
        assert_eq!(json[0]["has_visual"], false);
        assert_eq!(json[0]["engagement"], 8.0);
    }

    proptest! {
        #[test]
        fn score_formula_holds_for_all_counters(
            views in 0u64..1_000_000,
            likes in 0u64..1_000_000,
            comments in 0u64..1_000_000,
        ) {
            let score = engagement_score(views, likes, comments);
            let expected = likes as f64 + 2.0 * comments as f64 + views as f64 / 100.0;
            prop_assert_eq!(score, expected);
            prop_assert!(score >= 0.0);
        }
    }
}
