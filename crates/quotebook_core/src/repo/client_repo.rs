//! Client repository contract and local implementation.
//!
//! Deleting a client does not touch estimates; their `client_id` is left
//! dangling and resolves to `None` on the next read.

use crate::datasource::{ClientLocalDataSource, SourceError};
use crate::model::client::{Client, ClientId};
use crate::repo::failure::{CoreResult, Failure};
use crate::storage::{ClientRecord, Snapshot};

/// Repository interface for client operations.
pub trait ClientRepository: Send + Sync {
    fn list_clients(&self) -> CoreResult<Vec<Client>>;
    fn get_client(&self, id: ClientId) -> CoreResult<Client>;
    /// Inserts or overwrites the client.
    fn save_client(&self, client: &Client) -> CoreResult<Client>;
    fn delete_client(&self, id: ClientId) -> CoreResult<()>;
}

/// Client repository over the local `clients` collection.
pub struct LocalClientRepository {
    clients: ClientLocalDataSource,
}

impl LocalClientRepository {
    pub fn new(clients: ClientLocalDataSource) -> Self {
        Self { clients }
    }
}

impl ClientRepository for LocalClientRepository {
    fn list_clients(&self) -> CoreResult<Vec<Client>> {
        Ok(self
            .clients
            .all()?
            .iter()
            .map(|record| record.from_snapshot(()))
            .collect())
    }

    fn get_client(&self, id: ClientId) -> CoreResult<Client> {
        let record = self.clients.get(id).map_err(|err| match err {
            SourceError::NotFound { .. } => client_not_found(id),
            other => other.into(),
        })?;
        Ok(record.from_snapshot(()))
    }

    fn save_client(&self, client: &Client) -> CoreResult<Client> {
        self.clients.put(&ClientRecord::to_snapshot(client))?;
        Ok(client.clone())
    }

    fn delete_client(&self, id: ClientId) -> CoreResult<()> {
        if !self.clients.delete(id)? {
            return Err(client_not_found(id));
        }
        Ok(())
    }
}

fn client_not_found(id: ClientId) -> Failure {
    Failure::not_found(format!("Client not found: {id}"))
}
