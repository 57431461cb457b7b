// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store trait for performance-record persistence backends.

use async_trait::async_trait;

use crate::error::GrowthPilotError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{OwnerId, PerformanceRecord};

/// Adapter for performance-record persistence backends.
///
/// Stores assign `created_at` at insert time and guarantee it strictly
/// increases with insertion order per owner. Consumers that need ordered
/// reads should prefer [`list_by_owner`](RecordStore::list_by_owner) and
/// fall back to the unordered variant plus a client-side sort when the
/// backend cannot service a compound ordering query.
#[async_trait]
pub trait RecordStore: PluginAdapter {
    /// Initializes the backend (migrations, connection setup).
    async fn initialize(&self) -> Result<(), GrowthPilotError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), GrowthPilotError>;

    /// Inserts a record, returning it with the store-assigned `created_at`.
    async fn insert_record(
        &self,
        record: &PerformanceRecord,
    ) -> Result<PerformanceRecord, GrowthPilotError>;

    /// Lists an owner's records, most-recent-first by `created_at`.
    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<PerformanceRecord>, GrowthPilotError>;

    /// Lists an owner's records in unspecified order.
    async fn list_by_owner_unordered(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<PerformanceRecord>, GrowthPilotError>;
}
