// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Growth Pilot workspace.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the workspace. Collaborator adapters
//! (generative provider, record store) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GrowthPilotError;
pub use types::{
    AdapterType, GenerateRequest, GenerateResponse, HealthStatus, OwnerId, PerformanceRecord,
    RecordId, TokenUsage,
};

// Re-export adapter traits at crate root.
pub use traits::{GenerativeAdapter, PluginAdapter, RecordStore};
