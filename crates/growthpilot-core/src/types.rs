// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Growth Pilot workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a logged performance record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Unique identifier for the owner of a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

/// One logged content item with its performance counters.
///
/// Records are created by the logging workflow, read-only everywhere else.
/// `created_at` is assigned by the store at log time and strictly increases
/// with insertion order for a given owner; `posted_at` is the user-supplied
/// wall-clock time the content went live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub id: RecordId,
    pub owner: OwnerId,
    /// Body text of the post. Non-empty by store invariant.
    pub body: String,
    /// Optional reference to an attached visual.
    pub image_url: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// When the content was posted (user-supplied).
    pub posted_at: DateTime<Utc>,
    /// Store-assigned insertion timestamp in unix milliseconds.
    pub created_at: i64,
}

impl PerformanceRecord {
    /// Whether the record carries a visual attachment.
    pub fn has_visual(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// A request to a generative text provider.
///
/// When `response_schema` is set the provider is asked for structured JSON
/// output conforming to that shape; the caller remains responsible for
/// parsing and validating the returned text.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The natural-language instruction.
    pub prompt: String,
    /// Optional output schema in the provider's schema dialect.
    pub response_schema: Option<serde_json::Value>,
    /// Maximum tokens to generate.
    pub max_output_tokens: u32,
}

impl GenerateRequest {
    /// Builds an unstructured text request.
    pub fn text(prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            max_output_tokens,
        }
    }

    /// Builds a structured request constrained to `schema`.
    pub fn structured(
        prompt: impl Into<String>,
        schema: serde_json::Value,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
            max_output_tokens,
        }
    }
}

/// A response from a generative text provider.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Generated text. `None` when the provider answered without a payload,
    /// which callers must treat the same as a transport failure.
    pub text: Option<String>,
    /// Model that produced the response.
    pub model: String,
    /// Token usage statistics.
    pub usage: TokenUsage,
}

/// Token usage statistics reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
