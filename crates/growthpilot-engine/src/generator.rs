// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared settings and the bounded-deadline call wrapper used by every
//! generator in the engine.

use std::time::Duration;

use growthpilot_core::{GenerateRequest, GenerativeAdapter, GrowthPilotError};

/// Settings shared by the analysis, calendar, and rewrite generators.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSettings {
    /// Bounded deadline for one generative call. A call that exceeds it
    /// resolves through the same paths as a provider failure.
    pub deadline: Duration,
    /// Maximum tokens requested per generation.
    pub max_output_tokens: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(30),
            max_output_tokens: 2048,
        }
    }
}

/// Runs one generative call under the deadline.
///
/// Returns the response text (`None` models a success with no payload);
/// an elapsed deadline surfaces as [`GrowthPilotError::Timeout`] so
/// downstream failure handling does not need a separate branch.
pub(crate) async fn generate_with_deadline(
    provider: &dyn GenerativeAdapter,
    request: GenerateRequest,
    deadline: Duration,
) -> Result<Option<String>, GrowthPilotError> {
    match tokio::time::timeout(deadline, provider.generate(request)).await {
        Ok(Ok(response)) => Ok(response.text),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(GrowthPilotError::Timeout { duration: deadline }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growthpilot_test_utils::{MockProvider, MockReply};

    #[tokio::test]
    async fn passes_through_text() {
        let provider = MockProvider::with_responses(vec!["hello".into()]);
        let out = generate_with_deadline(
            &provider,
            GenerateRequest::text("hi", 100),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(out.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn passes_through_empty_payload() {
        let provider = MockProvider::with_replies(vec![MockReply::Empty]);
        let out = generate_with_deadline(
            &provider,
            GenerateRequest::text("hi", 100),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert!(out.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_deadline_becomes_timeout_error() {
        let provider =
            MockProvider::with_replies(vec![MockReply::Stall(Duration::from_secs(120))]);
        let err = generate_with_deadline(
            &provider,
            GenerateRequest::text("hi", 100),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GrowthPilotError::Timeout { .. }));
    }
}
