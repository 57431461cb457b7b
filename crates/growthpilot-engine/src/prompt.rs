// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt builders and response schemas for the generative calls.
//!
//! Schemas are in the Gemini dialect (`OBJECT`/`ARRAY`/`STRING`/`NUMBER`
//! type tags) and mirror the shapes the engine parses strictly.

use growthpilot_core::PerformanceRecord;

use crate::metrics::{self, MetricSummary};

/// How many recent records the calendar prompt cites as style examples.
const STYLE_SAMPLE_SIZE: usize = 5;

/// First-stage prompt: time windows, niche, and engagement health from the
/// serialized metric summaries.
pub fn analysis_prompt(summaries: &[MetricSummary]) -> String {
    let data = serde_json::to_string(summaries).unwrap_or_else(|_| "[]".to_string());
    format!(
        "You are a social media growth expert. Analyze this dataset of posts and their performance:\n\
         {data}\n\n\
         1. Identify up to 3 best time windows for posting based on high engagement.\n\
         2. Identify the specific content niche based on the text.\n\
         3. Calculate an abstract engagement health score (0-100).\n\
         Note: posts with visuals (has_visual: true) often perform better. Weight them favorably in your score and analysis.\n\n\
         Return JSON."
    )
}

/// Response schema for the first-stage analysis call.
pub fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "bestTimeSlots": {"type": "ARRAY", "items": {"type": "STRING"}},
            "nicheAnalysis": {"type": "STRING"},
            "engagementScore": {"type": "NUMBER"}
        }
    })
}

/// Second-stage prompt: a 3-day, 2-posts-per-day schedule for the detected
/// niche, with recent previews as style reference.
pub fn calendar_prompt(records: &[PerformanceRecord], niche: &str) -> String {
    let style_sample = records
        .iter()
        .take(STYLE_SAMPLE_SIZE)
        .map(|r| format!("- {}", metrics::preview(&r.body)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the identified niche \"{niche}\" and the style of these recent posts, \
         generate a 3-day content calendar with 2 posts per day.\n\n\
         Recent posts for style reference:\n\
         {style_sample}\n\n\
         Follow these rules:\n\
         - Mix of educational threads, questions, and personal insights.\n\
         - Strong hooks are mandatory for every entry.\n\
         - English language only.\n\n\
         Return a JSON array."
    )
}

/// Response schema for the second-stage calendar call.
pub fn calendar_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": {"type": "STRING", "description": "Day 1, Day 2, etc."},
                "time": {"type": "STRING", "description": "Suggested time e.g. 09:00 AM"},
                "topic": {"type": "STRING"},
                "hook": {"type": "STRING", "description": "The actual post text draft"}
            }
        }
    })
}

/// Rewrite prompt for a single body text.
pub fn rewrite_prompt(original: &str) -> String {
    format!(
        "Analyze the following post: \"{original}\".\n\
         Rewrite it to convey the same core message but with a fresh angle, keeping it concise and engaging.\n\
         Maintain a professional yet conversational tone.\n\
         Use a strong opening hook. Do not add hashtags unless they are extremely relevant (max 1)."
    )
}
