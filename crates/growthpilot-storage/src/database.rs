// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use growthpilot_core::GrowthPilotError;
use tracing::debug;

/// Handle to the SQLite database behind a tokio-rusqlite worker thread.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, applies PRAGMAs, and runs
    /// all pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, GrowthPilotError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| GrowthPilotError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| -> Result<(), GrowthPilotError> {
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode=WAL;")
                    .map_err(|e| GrowthPilotError::Storage {
                        source: Box::new(e),
                    })?;
            }
            conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;")
                .map_err(|e| GrowthPilotError::Storage {
                    source: Box::new(e),
                })?;
            crate::migrations::run_migrations(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| GrowthPilotError::Storage {
            source: Box::new(e),
        })?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection handle.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Maps a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> GrowthPilotError {
    GrowthPilotError::Storage {
        source: Box::new(e),
    }
}
