// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for Growth Pilot.
//!
//! This crate implements [`GenerativeAdapter`] for the Gemini
//! `generateContent` API, supporting plain-text and schema-constrained
//! structured output.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use growthpilot_config::model::GeminiConfig;
use growthpilot_core::{
    AdapterType, GenerateRequest, GenerateResponse, GenerativeAdapter, GrowthPilotError,
    HealthStatus, PluginAdapter, TokenUsage,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig};

/// Gemini provider implementing [`GenerativeAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a new Gemini provider from the given configuration.
    pub fn new(config: &GeminiConfig) -> Result<Self, GrowthPilotError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GeminiClient::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        info!(model = config.model, "Gemini provider initialized");

        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Converts a [`GenerateRequest`] to the wire [`GenerateContentRequest`].
    ///
    /// A structured request gets `responseMimeType: application/json` plus
    /// the caller's schema; plain-text requests carry only the token cap.
    fn to_content_request(&self, request: &GenerateRequest) -> GenerateContentRequest {
        let generation_config = match &request.response_schema {
            Some(schema) => GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema.clone()),
                max_output_tokens: Some(request.max_output_tokens),
            },
            None => GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                max_output_tokens: Some(request.max_output_tokens),
            },
        };

        GenerateContentRequest {
            contents: vec![Content::user(request.prompt.clone())],
            generation_config: Some(generation_config),
        }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, GrowthPilotError> {
        // Verifying the client is constructable is enough; a full check
        // would consume quota on every health probe.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GrowthPilotError> {
        debug!("Gemini provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl GenerativeAdapter for GeminiProvider {
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, GrowthPilotError> {
        let api_request = self.to_content_request(&request);
        let response = self.client.generate_content(&api_request).await?;

        let usage = response
            .usage_metadata
            .as_ref()
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(GenerateResponse {
            text: response.text(),
            model: self.client.model().to_string(),
            usage,
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, GrowthPilotError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("GEMINI_API_KEY").map_err(|_| {
        GrowthPilotError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )
    })
}
