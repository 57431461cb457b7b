// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the RecordStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use growthpilot_config::model::StorageConfig;
use growthpilot_core::types::{OwnerId, PerformanceRecord};
use growthpilot_core::{
    AdapterType, GrowthPilotError, HealthStatus, PluginAdapter, RecordStore,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed record store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily initialized on the first
/// call to [`RecordStore::initialize`].
pub struct SqliteRecordStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteRecordStore {
    /// Create a new SqliteRecordStore with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, GrowthPilotError> {
        self.db.get().ok_or_else(|| GrowthPilotError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteRecordStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, GrowthPilotError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GrowthPilotError> {
        // Shutdown delegates to a checkpoint if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn initialize(&self) -> Result<(), GrowthPilotError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| GrowthPilotError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite record store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), GrowthPilotError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn insert_record(
        &self,
        record: &PerformanceRecord,
    ) -> Result<PerformanceRecord, GrowthPilotError> {
        queries::records::insert_record(self.db()?, record).await
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<PerformanceRecord>, GrowthPilotError> {
        queries::records::list_by_owner(self.db()?, owner).await
    }

    async fn list_by_owner_unordered(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<PerformanceRecord>, GrowthPilotError> {
        queries::records::list_by_owner_unordered(self.db()?, owner).await
    }
}
