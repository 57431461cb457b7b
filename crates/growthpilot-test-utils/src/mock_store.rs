// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory record store for deterministic testing.
//!
//! `MockRecordStore` implements `RecordStore` over a `Vec`, with switches
//! to simulate a backend that cannot service the compound ordering query
//! (forcing consumers down their client-side sort fallback) or one that is
//! entirely unreachable.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use growthpilot_core::types::{OwnerId, PerformanceRecord};
use growthpilot_core::{
    AdapterType, GrowthPilotError, HealthStatus, PluginAdapter, RecordStore,
};

/// An in-memory record store with scriptable failure modes.
pub struct MockRecordStore {
    records: Arc<Mutex<Vec<PerformanceRecord>>>,
    fail_ordered: bool,
    fail_all: bool,
}

impl MockRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_ordered: false,
            fail_all: false,
        }
    }

    /// Create a store pre-loaded with records (insertion order preserved).
    pub fn with_records(records: Vec<PerformanceRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            fail_ordered: false,
            fail_all: false,
        }
    }

    /// Make the ordered query fail, as a backend without compound ordering
    /// support would. The unordered query keeps working.
    pub fn failing_ordered(mut self) -> Self {
        self.fail_ordered = true;
        self
    }

    /// Make every query fail.
    pub fn failing_all(mut self) -> Self {
        self.fail_all = true;
        self
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockRecordStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GrowthPilotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GrowthPilotError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn initialize(&self) -> Result<(), GrowthPilotError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), GrowthPilotError> {
        Ok(())
    }

    async fn insert_record(
        &self,
        record: &PerformanceRecord,
    ) -> Result<PerformanceRecord, GrowthPilotError> {
        let mut records = self.records.lock().await;
        let prev_max = records
            .iter()
            .filter(|r| r.owner == record.owner)
            .map(|r| r.created_at)
            .max()
            .unwrap_or(0);

        let mut inserted = record.clone();
        inserted.created_at = prev_max + 1;
        records.push(inserted.clone());
        Ok(inserted)
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<PerformanceRecord>, GrowthPilotError> {
        if self.fail_all || self.fail_ordered {
            return Err(GrowthPilotError::Storage {
                source: "compound ordering query unsupported".into(),
            });
        }
        let records = self.records.lock().await;
        let mut matching: Vec<_> = records.iter().filter(|r| &r.owner == owner).cloned().collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn list_by_owner_unordered(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<PerformanceRecord>, GrowthPilotError> {
        if self.fail_all {
            return Err(GrowthPilotError::Storage {
                source: "store unreachable".into(),
            });
        }
        let records = self.records.lock().await;
        Ok(records.iter().filter(|r| &r.owner == owner).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn ordered_listing_is_most_recent_first() {
        let store = MockRecordStore::new();
        for i in 0..3 {
            store
                .insert_record(&fixtures::record("owner-1", i))
                .await
                .unwrap();
        }
        let records = store.list_by_owner(&OwnerId("owner-1".into())).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].created_at > records[1].created_at);
        assert!(records[1].created_at > records[2].created_at);
    }

    #[tokio::test]
    async fn failing_ordered_still_serves_unordered() {
        let store = MockRecordStore::with_records(fixtures::record_batch("owner-1", 3))
            .failing_ordered();
        assert!(store.list_by_owner(&OwnerId("owner-1".into())).await.is_err());
        let unordered = store
            .list_by_owner_unordered(&OwnerId("owner-1".into()))
            .await
            .unwrap();
        assert_eq!(unordered.len(), 3);
    }

    #[tokio::test]
    async fn failing_all_rejects_both_queries() {
        let store = MockRecordStore::with_records(fixtures::record_batch("owner-1", 2))
            .failing_all();
        assert!(store.list_by_owner(&OwnerId("owner-1".into())).await.is_err());
        assert!(store
            .list_by_owner_unordered(&OwnerId("owner-1".into()))
            .await
            .is_err());
    }
}
