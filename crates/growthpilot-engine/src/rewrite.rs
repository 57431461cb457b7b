// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-record rewrite, independent of the strategy pipeline.
//!
//! The caller displays the return value directly, so failure is signaled
//! by a descriptive string rather than an error type. At most one rewrite
//! may be in flight per generator; concurrent requests are rejected with
//! a busy message instead of queued.

use std::sync::Arc;

use growthpilot_core::{GenerateRequest, GenerativeAdapter};
use tokio::sync::Mutex;
use tracing::warn;

use crate::generator::{generate_with_deadline, GeneratorSettings};
use crate::prompt;

/// Returned when the provider answers without a payload.
pub const REWRITE_EMPTY_MESSAGE: &str = "Could not generate rewrite.";

/// Returned to a concurrent rewrite request while one is in flight.
pub const REWRITE_BUSY_MESSAGE: &str =
    "Error: a rewrite is already in progress. Try again in a moment.";

/// Rewrites one body text through the generative provider.
pub struct RewriteGenerator {
    provider: Arc<dyn GenerativeAdapter>,
    settings: GeneratorSettings,
    in_flight: Mutex<()>,
}

impl RewriteGenerator {
    pub fn new(provider: Arc<dyn GenerativeAdapter>, settings: GeneratorSettings) -> Self {
        Self {
            provider,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// Rewrites `original`, returning the new text or a descriptive error
    /// string. The result is never empty.
    pub async fn rewrite(&self, original: &str) -> String {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("rejecting concurrent rewrite request");
                return REWRITE_BUSY_MESSAGE.to_string();
            }
        };

        let request = GenerateRequest::text(
            prompt::rewrite_prompt(original),
            self.settings.max_output_tokens,
        );

        match generate_with_deadline(self.provider.as_ref(), request, self.settings.deadline)
            .await
        {
            Ok(Some(text)) => text,
            Ok(None) => REWRITE_EMPTY_MESSAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "rewrite call failed");
                format!("Error: {e}")
            }
        }
    }
}
