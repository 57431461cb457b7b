// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generative provider for deterministic testing.
//!
//! `MockProvider` implements `GenerativeAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls. Replies can
//! script the full failure taxonomy: text, empty payload, provider error,
//! and a stalled call for deadline tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use growthpilot_core::{
    AdapterType, GenerateRequest, GenerateResponse, GenerativeAdapter, GrowthPilotError,
    HealthStatus, PluginAdapter, TokenUsage,
};

/// One scripted reply for the mock provider.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Successful generation returning the given text.
    Text(String),
    /// Success with no payload (`text: None`).
    Empty,
    /// Provider failure with the given message.
    Fail(String),
    /// Sleeps for the given duration, then returns "stalled response".
    /// Combine with a paused tokio clock to exercise deadlines.
    Stall(Duration),
}

/// A mock generative provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned. Every received request is recorded for
/// prompt assertions.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider pre-loaded with successful text replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_replies(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Add a reply to the end of the queue.
    pub async fn add_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Requests received so far, in order.
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, GrowthPilotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GrowthPilotError> {
        Ok(())
    }
}

#[async_trait]
impl GenerativeAdapter for MockProvider {
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, GrowthPilotError> {
        self.requests.lock().await.push(request);

        let usage = TokenUsage {
            input_tokens: 10,
            output_tokens: 20,
        };

        match self.next_reply().await {
            MockReply::Text(text) => Ok(GenerateResponse {
                text: Some(text),
                model: "mock-model".to_string(),
                usage,
            }),
            MockReply::Empty => Ok(GenerateResponse {
                text: None,
                model: "mock-model".to_string(),
                usage,
            }),
            MockReply::Fail(message) => Err(GrowthPilotError::Provider {
                message,
                source: None,
            }),
            MockReply::Stall(duration) => {
                tokio::time::sleep(duration).await;
                Ok(GenerateResponse {
                    text: Some("stalled response".to_string()),
                    model: "mock-model".to_string(),
                    usage,
                })
            }
        }
    }
}
