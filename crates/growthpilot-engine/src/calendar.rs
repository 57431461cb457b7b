// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Second-stage calendar generation from the detected niche.
//!
//! Total by contract: every failure collapses to an empty sequence, which
//! is a valid terminal result, distinct from the analysis stage's non-empty
//! fallback. Gate enforcement is the caller's responsibility -- invoking
//! this while locked is harmless but produces suggestions the caller
//! should not surface.

use std::sync::Arc;

use growthpilot_core::{GenerateRequest, GenerativeAdapter, PerformanceRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::generator::{generate_with_deadline, GeneratorSettings};
use crate::prompt;

/// One scheduled post suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarEntry {
    pub day: String,
    pub time: String,
    pub topic: String,
    /// The actual post text draft.
    pub hook: String,
}

/// Second-stage generator. Never fails; failures yield an empty sequence.
pub struct CalendarGenerator {
    provider: Arc<dyn GenerativeAdapter>,
    settings: GeneratorSettings,
}

impl CalendarGenerator {
    pub fn new(provider: Arc<dyn GenerativeAdapter>, settings: GeneratorSettings) -> Self {
        Self { provider, settings }
    }

    /// Generates the content schedule for `niche`, citing recent records
    /// as style reference.
    pub async fn generate(
        &self,
        records: &[PerformanceRecord],
        niche: &str,
    ) -> Vec<CalendarEntry> {
        let request = GenerateRequest::structured(
            prompt::calendar_prompt(records, niche),
            prompt::calendar_schema(),
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
                warn!("calendar call returned no payload");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "calendar call failed");
                return Vec::new();
            }
        };

        match parse_calendar(&text) {
            Ok(entries) => {
                debug!(entries = entries.len(), "calendar validated");
                entries
            }
            Err(reason) => {
                warn!(%reason, "calendar payload failed validation");
                Vec::new()
            }
        }
    }
}

fn parse_calendar(text: &str) -> Result<Vec<CalendarEntry>, String> {
    serde_json::from_str(text).map_err(|e| format!("shape mismatch: {e}"))
}
