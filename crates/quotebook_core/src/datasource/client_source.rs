use crate::datasource::{Collection, SourceResult};
use crate::db::Database;
use crate::model::client::ClientId;
use crate::storage::ClientRecord;

/// Owner of the `clients` collection.
#[derive(Clone)]
pub struct ClientLocalDataSource {
    clients: Collection<ClientRecord>,
}

impl ClientLocalDataSource {
    pub fn open(db: Database) -> SourceResult<Self> {
        Ok(Self {
            clients: Collection::open(db)?,
        })
    }

    pub fn get(&self, id: ClientId) -> SourceResult<ClientRecord> {
        self.clients.get(id)
    }

    /// Lookup used by relation resolution; absence is not an error.
    pub fn find(&self, id: ClientId) -> SourceResult<Option<ClientRecord>> {
        self.clients.find(id)
    }

    pub fn put(&self, record: &ClientRecord) -> SourceResult<()> {
        self.clients.put(record)
    }

    pub fn delete(&self, id: ClientId) -> SourceResult<bool> {
        self.clients.delete(id)
    }

    pub fn all(&self) -> SourceResult<Vec<ClientRecord>> {
        self.clients.all()
    }
}
