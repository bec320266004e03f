//! Schema versions for the keyed collection store.
//!
//! # Responsibility
//! - Describe, per schema version, which collections it introduces.
//! - Bring a connection from its `PRAGMA user_version` to the latest
//!   version inside one transaction.
//!
//! # Invariants
//! - Versions are strictly increasing and never renumbered.
//! - Every collection table has exactly `(id, type_id, body)` and no
//!   foreign keys; relations live inside the JSON body.

use crate::db::{DbError, DbResult};
use crate::storage::{
    ClientRecord, EstimateRecord, LineItemRecord, ProjectRecord, SettingsRecord, StorageRecord,
};
use log::info;
use rusqlite::{Connection, Transaction};

struct SchemaVersion {
    version: u32,
    collections: &'static [&'static str],
}

const SCHEMA: &[SchemaVersion] = &[SchemaVersion {
    version: 1,
    collections: &[
        ProjectRecord::COLLECTION,
        EstimateRecord::COLLECTION,
        LineItemRecord::COLLECTION,
        ClientRecord::COLLECTION,
        SettingsRecord::COLLECTION,
    ],
}];

/// Version range covered by one [`apply_migrations`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub from: u32,
    pub to: u32,
}

impl MigrationOutcome {
    pub fn applied_any(&self) -> bool {
        self.from != self.to
    }
}

/// Newest schema version this build can read and write.
pub fn latest_version() -> u32 {
    SCHEMA.last().map_or(0, |schema| schema.version)
}

/// Every collection table the latest schema declares.
pub fn collections() -> impl Iterator<Item = &'static str> {
    SCHEMA
        .iter()
        .flat_map(|schema| schema.collections.iter().copied())
}

/// Upgrades `conn` to [`latest_version`].
///
/// Databases written by a newer build are refused instead of downgraded.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationOutcome> {
    let from = read_user_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<&SchemaVersion> = SCHEMA.iter().filter(|s| s.version > from).collect();
    if pending.is_empty() {
        return Ok(MigrationOutcome { from, to });
    }

    let tx = conn.transaction()?;
    for schema in pending {
        for collection in schema.collections {
            create_collection(&tx, collection)?;
        }
        tx.pragma_update(None, "user_version", schema.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} collections={}",
            schema.version,
            schema.collections.len()
        );
    }
    tx.commit()?;

    Ok(MigrationOutcome { from, to })
}

fn create_collection(tx: &Transaction<'_>, name: &str) -> rusqlite::Result<()> {
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {name} (
            id TEXT PRIMARY KEY NOT NULL,
            type_id INTEGER NOT NULL,
            body TEXT NOT NULL
        );"
    ))
}

fn read_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
