// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Performance record CRUD operations.

use chrono::{DateTime, Utc};
use growthpilot_core::types::{OwnerId, PerformanceRecord, RecordId};
use growthpilot_core::GrowthPilotError;
use rusqlite::params;

use crate::database::Database;

/// Insert a new record, assigning `created_at` in the store.
///
/// The assigned value is `max(now_ms, prev_max + 1)` for the record's owner,
/// so insertion order always yields strictly increasing timestamps even when
/// two inserts land within the same millisecond. Returns the record with the
/// assigned timestamp filled in.
pub async fn insert_record(
    db: &Database,
    record: &PerformanceRecord,
) -> Result<PerformanceRecord, GrowthPilotError> {
    if record.body.trim().is_empty() {
        return Err(GrowthPilotError::Storage {
            source: "record body must not be empty".into(),
        });
    }

    let mut out = record.clone();
    let record = record.clone();
    let now_ms = Utc::now().timestamp_millis();

    let assigned = db
        .connection()
        .call(move |conn| {
            let prev_max: i64 = conn.query_row(
                "SELECT COALESCE(MAX(created_at), 0) FROM records WHERE owner_id = ?1",
                params![record.owner.0],
                |row| row.get(0),
            )?;
            let created_at = now_ms.max(prev_max + 1);

            conn.execute(
                "INSERT INTO records (id, owner_id, body, image_url, views, likes, comments, posted_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id.0,
                    record.owner.0,
                    record.body,
                    record.image_url,
                    record.views as i64,
                    record.likes as i64,
                    record.comments as i64,
                    record.posted_at.to_rfc3339(),
                    created_at,
                ],
            )?;
            Ok(created_at)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    out.created_at = assigned;
    Ok(out)
}

/// Get an owner's records, most-recent-first by `created_at`.
pub async fn list_by_owner(
    db: &Database,
    owner: &OwnerId,
) -> Result<Vec<PerformanceRecord>, GrowthPilotError> {
    let owner_id = owner.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, body, image_url, views, likes, comments, posted_at, created_at
                 FROM records WHERE owner_id = ?1
                 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![owner_id], row_to_record)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get an owner's records without any ordering guarantee.
///
/// Exists for consumers that tolerate backends where the compound ordering
/// query is unsupported and sort client-side instead.
pub async fn list_by_owner_unordered(
    db: &Database,
    owner: &OwnerId,
) -> Result<Vec<PerformanceRecord>, GrowthPilotError> {
    let owner_id = owner.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, body, image_url, views, likes, comments, posted_at, created_at
                 FROM records WHERE owner_id = ?1",
            )?;
            let rows = stmt.query_map(params![owner_id], row_to_record)?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<PerformanceRecord> {
    let posted_at_raw: String = row.get(7)?;
    let posted_at: DateTime<Utc> = posted_at_raw
        .parse::<DateTime<Utc>>()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(PerformanceRecord {
        id: RecordId(row.get(0)?),
        owner: OwnerId(row.get(1)?),
        body: row.get(2)?,
        image_url: row.get(3)?,
        views: row.get::<_, i64>(4)? as u64,
        likes: row.get::<_, i64>(5)? as u64,
        comments: row.get::<_, i64>(6)? as u64,
        posted_at,
        created_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("records.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn make_record(id: &str, owner: &str, body: &str) -> PerformanceRecord {
        PerformanceRecord {
            id: RecordId(id.to_string()),
            owner: OwnerId(owner.to_string()),
            body: body.to_string(),
            image_url: None,
            views: 150,
            likes: 4,
            comments: 1,
            posted_at: "2026-03-01T09:00:00Z".parse().unwrap(),
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn insert_and_list_most_recent_first() {
        let (db, _dir) = setup_db().await;

        for i in 0..3 {
            let r = make_record(&format!("r{i}"), "owner-1", &format!("post {i}"));
            insert_record(&db, &r).await.unwrap();
        }

        let records = list_by_owner(&db, &OwnerId("owner-1".into())).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id.0, "r2");
        assert_eq!(records[1].id.0, "r1");
        assert_eq!(records[2].id.0, "r0");
    }

    #[tokio::test]
    async fn created_at_strictly_increases_per_owner() {
        let (db, _dir) = setup_db().await;

        // Inserting faster than the clock ticks must still produce strictly
        // increasing timestamps.
        let mut stamps = Vec::new();
        for i in 0..10 {
            let r = make_record(&format!("r{i}"), "owner-1", "body");
            let inserted = insert_record(&db, &r).await.unwrap();
            stamps.push(inserted.created_at);
        }
        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0], "created_at must strictly increase: {stamps:?}");
        }
    }

    #[tokio::test]
    async fn unordered_plus_sort_matches_ordered() {
        let (db, _dir) = setup_db().await;

        for i in 0..5 {
            let r = make_record(&format!("r{i}"), "owner-1", "body");
            insert_record(&db, &r).await.unwrap();
        }

        let ordered = list_by_owner(&db, &OwnerId("owner-1".into())).await.unwrap();
        let mut unordered = list_by_owner_unordered(&db, &OwnerId("owner-1".into()))
            .await
            .unwrap();
        unordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        assert_eq!(ordered, unordered);
    }

    #[tokio::test]
    async fn owners_are_isolated() {
        let (db, _dir) = setup_db().await;

        insert_record(&db, &make_record("a1", "alice", "alice post"))
            .await
            .unwrap();
        insert_record(&db, &make_record("b1", "bob", "bob post"))
            .await
            .unwrap();

        let alice = list_by_owner(&db, &OwnerId("alice".into())).await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].id.0, "a1");
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let (db, _dir) = setup_db().await;
        let result = insert_record(&db, &make_record("r1", "owner-1", "   ")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn round_trip_preserves_fields() {
        let (db, _dir) = setup_db().await;

        let mut r = make_record("r1", "owner-1", "launch day recap");
        r.image_url = Some("https://cdn.example/launch.png".into());
        r.views = 12_345;
        r.likes = 67;
        r.comments = 8;
        insert_record(&db, &r).await.unwrap();

        let records = list_by_owner(&db, &OwnerId("owner-1".into())).await.unwrap();
        let got = &records[0];
        assert_eq!(got.body, "launch day recap");
        assert_eq!(got.image_url.as_deref(), Some("https://cdn.example/launch.png"));
        assert_eq!(got.views, 12_345);
        assert_eq!(got.likes, 67);
        assert_eq!(got.comments, 8);
        assert_eq!(got.posted_at, r.posted_at);
    }
}
