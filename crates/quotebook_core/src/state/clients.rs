use crate::analytics::AnalyticsEvent;
use crate::model::client::{Client, ClientId};
use crate::repo::client_repo::ClientRepository;
use crate::repo::failure::CoreResult;
use crate::state::{FeatureHandler, Transition};
use crate::usecase::client::{DeleteClient, ListClients, SaveClient, SaveClientParams};
use crate::usecase::UseCase;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientsEvent {
    Load,
    Save(SaveClientParams),
    Delete { id: ClientId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientsData {
    Clients(Vec<Client>),
    Saved(Client),
    Deleted(ClientId),
}

pub struct ClientsHandler {
    list: ListClients,
    save: SaveClient,
    delete: DeleteClient,
}

impl ClientsHandler {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self {
            list: ListClients::new(Arc::clone(&repo)),
            save: SaveClient::new(Arc::clone(&repo)),
            delete: DeleteClient::new(repo),
        }
    }
}

impl FeatureHandler for ClientsHandler {
    type Event = ClientsEvent;
    type Data = ClientsData;

    const FEATURE: &'static str = "clients";

    fn event_name(event: &ClientsEvent) -> &'static str {
        match event {
            ClientsEvent::Load => "load",
            ClientsEvent::Save(_) => "save",
            ClientsEvent::Delete { .. } => "delete",
        }
    }

    fn handle(&mut self, event: ClientsEvent) -> CoreResult<Transition<ClientsData, ClientsEvent>> {
        match event {
            ClientsEvent::Load => Ok(Transition::loaded(ClientsData::Clients(
                self.list.execute(())?,
            ))),
            ClientsEvent::Save(params) => {
                let is_new = params.id.is_none();
                let client = self.save.execute(params)?;
                let analytics = AnalyticsEvent::new("client_saved")
                    .param("client_id", client.id.to_string())
                    .param("is_new", is_new);
                Ok(Transition::loaded(ClientsData::Saved(client))
                    .with_analytics(analytics)
                    .then_refresh(ClientsEvent::Load))
            }
            ClientsEvent::Delete { id } => {
                self.delete.execute(id)?;
                Ok(Transition::loaded(ClientsData::Deleted(id))
                    .with_analytics(
                        AnalyticsEvent::new("client_deleted").param("client_id", id.to_string()),
                    )
                    .then_refresh(ClientsEvent::Load))
            }
        }
    }
}
