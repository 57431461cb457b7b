// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record fixtures for engine and store tests.

use chrono::{Duration, TimeZone, Utc};
use growthpilot_core::types::{OwnerId, PerformanceRecord, RecordId};

/// Builds one record for `owner` with counters derived from `n`.
///
/// Every third record carries a visual attachment; posting hours cycle
/// through the day so time-window prompts see varied data.
pub fn record(owner: &str, n: i64) -> PerformanceRecord {
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    PerformanceRecord {
        id: RecordId(format!("r{n}")),
        owner: OwnerId(owner.to_string()),
        body: format!("post number {n} about shipping software"),
        image_url: if n % 3 == 0 {
            Some(format!("https://cdn.example/img-{n}.png"))
        } else {
            None
        },
        views: 100 + (n as u64) * 10,
        likes: 5 + (n as u64) % 7,
        comments: (n as u64) % 4,
        posted_at: base + Duration::hours(n % 24),
        created_at: n + 1,
    }
}

/// Builds `count` records for `owner`, most-recent-first, mirroring the
/// ordering the record store hands to consumers.
pub fn record_batch(owner: &str, count: usize) -> Vec<PerformanceRecord> {
    let mut records: Vec<_> = (0..count as i64).map(|n| record(owner, n)).collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records
}
