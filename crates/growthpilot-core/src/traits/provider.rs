// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative provider trait for text-generation service integrations.

use async_trait::async_trait;

use crate::error::GrowthPilotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerateRequest, GenerateResponse};

/// Adapter for generative text service integrations.
///
/// The boundary is stateless request/response: one prompt in, one text (or
/// structured-JSON text) out. Implementations must be safe for reentrant
/// use -- the strategy pipeline and the rewrite path share one instance.
#[async_trait]
pub trait GenerativeAdapter: PluginAdapter {
    /// Sends a generation request and returns the full response.
    ///
    /// When `request.response_schema` is set, the returned text is expected
    /// to be serialized JSON conforming to that shape, but no parsing
    /// guarantee is made at this boundary.
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, GrowthPilotError>;
}
