// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gating policy: record count alone decides whether calendar generation
//! unlocks. Pure function, no state of its own -- re-derive on every
//! change to the record set.

use serde::Serialize;

/// Fixed record-count cutoff unlocking calendar generation.
pub const UNLOCK_THRESHOLD: usize = 35;

/// Derived gating state for a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GatingState {
    pub record_count: usize,
    pub threshold: usize,
    /// True while `record_count < threshold`.
    pub locked: bool,
    /// Percentage toward the threshold, clamped to 0..=100.
    pub progress: u8,
}

impl GatingState {
    /// Derives the gating state from a record count.
    pub fn from_count(record_count: usize) -> Self {
        let progress = (record_count * 100 / UNLOCK_THRESHOLD).min(100) as u8;
        Self {
            record_count,
            threshold: UNLOCK_THRESHOLD,
            locked: record_count < UNLOCK_THRESHOLD,
            progress,
        }
    }
}
