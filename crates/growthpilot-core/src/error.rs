// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Growth Pilot workspace.

use thiserror::Error;

/// The primary error type used across all Growth Pilot adapter traits and
/// core operations.
#[derive(Debug, Error)]
pub enum GrowthPilotError {
    /// Configuration errors (invalid TOML, missing API key, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative provider errors (API failure, quota, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A generative call exceeded its bounded deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
