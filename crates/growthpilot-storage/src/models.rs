// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `growthpilot-core::types` for use
//! across adapter trait boundaries. This module re-exports them for
//! convenience within the storage crate.

pub use growthpilot_core::types::{OwnerId, PerformanceRecord, RecordId};
