//! Client operations.

use crate::model::client::{Client, ClientId};
use crate::model::now_epoch_ms;
use crate::repo::client_repo::ClientRepository;
use crate::repo::failure::CoreResult;
use crate::usecase::validate;
use crate::usecase::UseCase;
use std::sync::Arc;

/// Create-or-update input. `id: None` creates a new client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveClientParams {
    pub id: Option<ClientId>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct SaveClient {
    repo: Arc<dyn ClientRepository>,
}

impl SaveClient {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for SaveClient {
    type Params = SaveClientParams;
    type Output = Client;

    fn execute(&self, params: SaveClientParams) -> CoreResult<Client> {
        let name = validate::required_text(&params.name, "Client name cannot be empty")?;
        let email = validate::optional_email(params.email.as_deref())?;
        let phone = validate::optional_text(params.phone.as_deref());
        let address = validate::optional_text(params.address.as_deref());

        let base = match params.id {
            Some(id) => self.repo.get_client(id)?,
            None => Client::new(name.clone(), now_epoch_ms()),
        };
        let client = Client {
            name,
            email,
            phone,
            address,
            ..base
        };
        self.repo.save_client(&client)
    }
}

/// Deletes a client. Estimates referencing it keep the dangling id.
pub struct DeleteClient {
    repo: Arc<dyn ClientRepository>,
}

impl DeleteClient {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for DeleteClient {
    type Params = ClientId;
    type Output = ();

    fn execute(&self, id: ClientId) -> CoreResult<()> {
        self.repo.delete_client(id)
    }
}

pub struct ListClients {
    repo: Arc<dyn ClientRepository>,
}

impl ListClients {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for ListClients {
    type Params = ();
    type Output = Vec<Client>;

    fn execute(&self, _params: ()) -> CoreResult<Vec<Client>> {
        self.repo.list_clients()
    }
}
