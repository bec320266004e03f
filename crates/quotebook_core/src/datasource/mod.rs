//! Local data sources over keyed SQLite collections.
//!
//! # Responsibility
//! - Own one keyed collection per entity type (`get`/`put`/`delete`).
//! - Resolve relations manually through `find_by_parent` scans and `get`.
//!
//! # Invariants
//! - `delete` of an absent id is a no-op, not an error.
//! - `find_by_parent` is a linear scan; there is no secondary index.
//! - Dangling references resolve to "absent", never to an error.
//! - Writes spanning collections are not transactional; callers write
//!   parents before children.

mod client_source;
mod collection;
mod estimate_source;
mod project_source;
mod settings_source;

pub use client_source::ClientLocalDataSource;
pub use collection::Collection;
pub use estimate_source::{EstimateLocalDataSource, ResolvedEstimate};
pub use project_source::ProjectLocalDataSource;
pub use settings_source::SettingsLocalDataSource;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type SourceResult<T> = Result<T, SourceError>;

/// Low-level faults raised by collections. Never crosses the repository
/// boundary.
#[derive(Debug)]
pub enum SourceError {
    Db(DbError),
    NotFound {
        collection: &'static str,
        id: Uuid,
    },
    /// Stored body could not be decoded or encoded.
    Codec {
        collection: &'static str,
        id: String,
        message: String,
    },
    /// Row was written by a different record shape.
    SchemaMismatch {
        collection: &'static str,
        id: String,
        expected: u32,
        found: u32,
    },
    MissingCollection(&'static str),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Codec {
                collection,
                id,
                message,
            } => write!(f, "cannot decode {collection} record `{id}`: {message}"),
            Self::SchemaMismatch {
                collection,
                id,
                expected,
                found,
            } => write!(
                f,
                "{collection} record `{id}` has type id {found}, expected {expected}"
            ),
            Self::MissingCollection(collection) => {
                write!(f, "collection `{collection}` is not available")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SourceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
