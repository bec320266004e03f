//! Generic keyed collection stored as `(id, type_id, body)` rows.

use crate::datasource::{SourceError, SourceResult};
use crate::db::Database;
use crate::storage::StorageRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::marker::PhantomData;
use uuid::Uuid;

/// One keyed collection holding records of type `R`.
pub struct Collection<R> {
    db: Database,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: StorageRecord> Collection<R> {
    /// Opens the collection, checking its backing table is migrated.
    pub fn open(db: Database) -> SourceResult<Self> {
        db.with_conn(|conn| ensure_collection_ready(conn, R::COLLECTION))?;
        Ok(Self {
            db,
            _record: PhantomData,
        })
    }

    /// Loads one record or fails with `NotFound`.
    pub fn get(&self, id: Uuid) -> SourceResult<R> {
        self.find(id)?.ok_or(SourceError::NotFound {
            collection: R::COLLECTION,
            id,
        })
    }

    /// Loads one record if present.
    pub fn find(&self, id: Uuid) -> SourceResult<Option<R>> {
        self.db.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT id, type_id, body FROM {} WHERE id = ?1;",
                        R::COLLECTION
                    ),
                    [id.to_string()],
                    read_raw_row,
                )
                .optional()?;
            row.map(decode::<R>).transpose()
        })
    }

    /// Inserts or overwrites the record under its key.
    pub fn put(&self, record: &R) -> SourceResult<()> {
        let id = record.key().to_string();
        let body = serde_json::to_string(record).map_err(|err| SourceError::Codec {
            collection: R::COLLECTION,
            id: id.clone(),
            message: err.to_string(),
        })?;
        self.db.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (id, type_id, body) VALUES (?1, ?2, ?3)
                     ON CONFLICT(id) DO UPDATE SET
                        type_id = excluded.type_id,
                        body = excluded.body;",
                    R::COLLECTION
                ),
                params![id, R::TYPE_ID, body],
            )?;
            Ok(())
        })
    }

    /// Removes the record. Returns whether a row existed.
    pub fn delete(&self, id: Uuid) -> SourceResult<bool> {
        self.db.with_conn(|conn| {
            let changed = conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1;", R::COLLECTION),
                [id.to_string()],
            )?;
            Ok(changed > 0)
        })
    }

    /// Every record in insertion order.
    pub fn all(&self) -> SourceResult<Vec<R>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, type_id, body FROM {} ORDER BY rowid ASC;",
                R::COLLECTION
            ))?;
            let mut rows = stmt.query([])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(decode::<R>(read_raw_row(row)?)?);
            }
            Ok(records)
        })
    }

    /// Records whose foreign key equals `parent_id`.
    ///
    /// Decodes and scans the whole collection; acceptable for the sizes an
    /// on-device store holds.
    pub fn find_by_parent(&self, parent_id: Uuid) -> SourceResult<Vec<R>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|record| record.parent_key() == Some(parent_id))
            .collect())
    }

    pub fn count(&self) -> SourceResult<usize> {
        self.db.with_conn(|conn| {
            let count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {};", R::COLLECTION),
                [],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }
}

struct RawRow {
    id: String,
    type_id: u32,
    body: String,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        type_id: row.get(1)?,
        body: row.get(2)?,
    })
}

fn decode<R: StorageRecord>(raw: RawRow) -> SourceResult<R> {
    if raw.type_id != R::TYPE_ID {
        return Err(SourceError::SchemaMismatch {
            collection: R::COLLECTION,
            id: raw.id,
            expected: R::TYPE_ID,
            found: raw.type_id,
        });
    }
    serde_json::from_str(&raw.body).map_err(|err| SourceError::Codec {
        collection: R::COLLECTION,
        id: raw.id,
        message: err.to_string(),
    })
}

fn ensure_collection_ready(conn: &Connection, table: &'static str) -> SourceResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(SourceError::MissingCollection(table));
    }
    Ok(())
}
