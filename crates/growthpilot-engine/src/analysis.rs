// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-stage analysis: best posting windows, niche, and engagement health.
//!
//! Total by contract: every failure path -- transport, deadline, empty
//! payload, shape mismatch -- resolves to the fixed fallback value. Callers
//! distinguish a real analysis from the fallback by the outcome tag, never
//! by inspecting label text.

use std::sync::Arc;

use growthpilot_core::{GenerateRequest, GenerativeAdapter, PerformanceRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::generator::{generate_with_deadline, GeneratorSettings};
use crate::metrics;
use crate::prompt;

/// Canned time windows returned when the generative pipeline fails.
pub const FALLBACK_TIME_SLOTS: [&str; 2] =
    ["Morning (08:00 - 10:00)", "Evening (18:00 - 20:00)"];

/// Placeholder niche label used by the fallback value.
pub const FALLBACK_NICHE: &str = "General Tech/SaaS (Default - Check API Key)";

/// Neutral engagement health used by the fallback value.
pub const FALLBACK_ENGAGEMENT_SCORE: f64 = 50.0;

/// Structured analysis payload, parsed strictly from provider output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisResult {
    /// 1 to 3 human-readable time windows, best first.
    pub best_time_slots: Vec<String>,
    /// Free-text niche label.
    pub niche_analysis: String,
    /// Engagement health in 0..=100.
    pub engagement_score: f64,
}

impl AnalysisResult {
    /// The deterministic fallback value. Hard-coded, not derived from data.
    pub fn fallback() -> Self {
        Self {
            best_time_slots: FALLBACK_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
            niche_analysis: FALLBACK_NICHE.to_string(),
            engagement_score: FALLBACK_ENGAGEMENT_SCORE,
        }
    }
}

/// Tagged analysis outcome: a validated provider result or the fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Provider output that passed strict validation.
    Real(AnalysisResult),
    /// The deterministic substitute after any failure.
    Fallback(AnalysisResult),
}

impl AnalysisOutcome {
    /// The analysis value regardless of provenance.
    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Real(r) | AnalysisOutcome::Fallback(r) => r,
        }
    }

    /// True when this outcome is the deterministic fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback(_))
    }

    /// The niche label, for the second-stage handoff.
    pub fn niche(&self) -> &str {
        &self.result().niche_analysis
    }
}

/// First-stage generator. Never fails; see [`AnalysisOutcome`].
pub struct AnalysisGenerator {
    provider: Arc<dyn GenerativeAdapter>,
    settings: GeneratorSettings,
}

impl AnalysisGenerator {
    pub fn new(provider: Arc<dyn GenerativeAdapter>, settings: GeneratorSettings) -> Self {
        Self { provider, settings }
    }

    /// Analyzes the full record set for one owner.
    ///
    /// Summaries are recomputed on every run; the record set itself is not
    /// sent to the provider.
    pub async fn analyze(&self, records: &[PerformanceRecord]) -> AnalysisOutcome {
        let summaries = metrics::summarize(records);
        let request = GenerateRequest::structured(
            prompt::analysis_prompt(&summaries),
            prompt::analysis_schema(),
            self.settings.max_output_tokens,
        );

        let text = match generate_with_deadline(
            self.provider.as_ref(),
            request,
            self.settings.deadline,
        )
        .await
        {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!("analysis call returned no payload, using fallback");
                return AnalysisOutcome::Fallback(AnalysisResult::fallback());
            }
            Err(e) => {
                warn!(error = %e, "analysis call failed, using fallback");
                return AnalysisOutcome::Fallback(AnalysisResult::fallback());
            }
        };

        match parse_analysis(&text) {
            Ok(result) => {
                debug!(
                    slots = result.best_time_slots.len(),
                    score = result.engagement_score,
                    "analysis validated"
                );
                AnalysisOutcome::Real(result)
            }
            Err(reason) => {
                warn!(%reason, "analysis payload failed validation, using fallback");
                AnalysisOutcome::Fallback(AnalysisResult::fallback())
            }
        }
    }
}

/// Strict shape validation: serde parse plus the range constraints the
/// schema alone cannot express.
fn parse_analysis(text: &str) -> Result<AnalysisResult, String> {
    let result: AnalysisResult =
        serde_json::from_str(text).map_err(|e| format!("shape mismatch: {e}"))?;

    let slots = result.best_time_slots.len();
    if !(1..=3).contains(&slots) {
        return Err(format!("expected 1..=3 time slots, got {slots}"));
    }
    if !(0.0..=100.0).contains(&result.engagement_score) {
        return Err(format!(
            "engagement score {} outside 0..=100",
            result.engagement_score
        ));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use growthpilot_test_utils::{fixtures, MockProvider, MockReply};
    use std::time::Duration;

    fn generator(provider: MockProvider) -> AnalysisGenerator {
        AnalysisGenerator::new(Arc::new(provider), GeneratorSettings::default())
    }

    const VALID_PAYLOAD: &str = r#"{
        "bestTimeSlots": ["9am"],
        "nicheAnalysis": "SaaS",
        "engagementScore": 80
    }"#;

    #[tokio::test]
    async fn valid_payload_is_returned_unmodified() {
        let r#gen = generator(MockProvider::with_responses(vec![VALID_PAYLOAD.into()]));
        let outcome = r#gen.analyze(&fixtures::record_batch("owner-1", 35)).await;

        assert!(!outcome.is_fallback());
        let result = outcome.result();
        assert_eq!(result.best_time_slots, vec!["9am"]);
        assert_eq!(result.niche_analysis, "SaaS");
        assert_eq!(result.engagement_score, 80.0);
    }

    #[tokio::test]
    async fn provider_failure_yields_the_fixed_fallback() {
        let r#gen = generator(MockProvider::with_replies(vec![MockReply::Fail(
            "network down".into(),
        )]));
        let outcome = r#gen.analyze(&fixtures::record_batch("owner-1", 5)).await;

        assert!(outcome.is_fallback());
        let result = outcome.result();
        assert_eq!(
            result.best_time_slots,
            vec!["Morning (08:00 - 10:00)", "Evening (18:00 - 20:00)"]
        );
        assert_eq!(result.engagement_score, 50.0);
        assert_eq!(result.niche_analysis, FALLBACK_NICHE);
    }

    #[tokio::test]
    async fn empty_payload_yields_fallback() {
        let r#gen = generator(MockProvider::with_replies(vec![MockReply::Empty]));
        let outcome = r#gen.analyze(&fixtures::record_batch("owner-1", 5)).await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn zero_records_still_resolves() {
        let r#gen = generator(MockProvider::with_replies(vec![MockReply::Fail(
            "no key".into(),
        )]));
        let outcome = r#gen.analyze(&[]).await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn shape_mismatch_is_treated_as_failure() {
        for bad in [
            "not json at all",
            r#"{"bestTimeSlots": [], "nicheAnalysis": "x", "engagementScore": 50}"#,
            r#"{"bestTimeSlots": ["a","b","c","d"], "nicheAnalysis": "x", "engagementScore": 50}"#,
            r#"{"bestTimeSlots": ["a"], "nicheAnalysis": "x", "engagementScore": 150}"#,
            r#"{"bestTimeSlots": ["a"], "engagementScore": 50}"#,
            r#"{"bestTimeSlots": ["a"], "nicheAnalysis": "x", "engagementScore": 50, "extra": 1}"#,
        ] {
            let r#gen = generator(MockProvider::with_responses(vec![bad.into()]));
            let outcome = r#gen.analyze(&fixtures::record_batch("owner-1", 5)).await;
            assert!(outcome.is_fallback(), "payload should be rejected: {bad}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_resolves_to_fallback_at_the_deadline() {
        let provider =
            MockProvider::with_replies(vec![MockReply::Stall(Duration::from_secs(300))]);
        let r#gen = AnalysisGenerator::new(
            Arc::new(provider),
            GeneratorSettings {
                deadline: Duration::from_secs(10),
                ..GeneratorSettings::default()
            },
        );
        let outcome = r#gen.analyze(&fixtures::record_batch("owner-1", 5)).await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn request_embeds_summaries_and_schema() {
        let provider = Arc::new(MockProvider::with_responses(vec![VALID_PAYLOAD.into()]));
        let r#gen = AnalysisGenerator::new(provider.clone(), GeneratorSettings::default());
        r#gen.analyze(&fixtures::record_batch("owner-1", 3)).await;

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("\"engagement\""));
        assert!(requests[0].prompt.contains("Weight them favorably"));
        let schema = requests[0].response_schema.as_ref().unwrap();
        assert_eq!(schema["properties"]["nicheAnalysis"]["type"], "STRING");
    }

    #[test]
    fn fallback_constants_match_parse_constraints() {
        let fallback = AnalysisResult::fallback();
        let json = serde_json::to_string(&fallback).unwrap();
        assert_eq!(parse_analysis(&json).unwrap(), fallback);
    }
}
