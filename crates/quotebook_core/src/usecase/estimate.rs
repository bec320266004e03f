//! Estimate operations.

use crate::model::client::ClientId;
use crate::model::estimate::{Estimate, EstimateId, LineItem};
use crate::model::now_epoch_ms;
use crate::model::project::ProjectId;
use crate::repo::client_repo::ClientRepository;
use crate::repo::estimate_repo::{EstimateDeletion, EstimateRepository};
use crate::repo::failure::{CoreResult, CoreResultExt};
use crate::usecase::validate;
use crate::usecase::UseCase;
use std::sync::Arc;

const EMPTY_NAME: &str = "Estimate name cannot be empty";

/// Unsaved line item input.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateEstimateParams {
    pub project_id: ProjectId,
    pub name: String,
    pub client_id: Option<ClientId>,
    pub tax_rate: f64,
    pub line_items: Vec<LineItemInput>,
}

pub struct CreateEstimate {
    estimates: Arc<dyn EstimateRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl CreateEstimate {
    pub fn new(estimates: Arc<dyn EstimateRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { estimates, clients }
    }
}

impl UseCase for CreateEstimate {
    type Params = CreateEstimateParams;
    type Output = Estimate;

    fn execute(&self, params: CreateEstimateParams) -> CoreResult<Estimate> {
        let name = validate::required_text(&params.name, EMPTY_NAME)?;
        let tax_rate = validate::tax_rate(params.tax_rate)?;
        let items = params
            .line_items
            .iter()
            .map(|input| {
                validate::line_item(&input.description, input.quantity, input.unit_price)
                    .map(|description| (description, input.quantity, input.unit_price))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let client = match params.client_id {
            Some(client_id) => Some(self.clients.get_client(client_id)?),
            None => None,
        };

        let mut estimate = Estimate::new(params.project_id, name, now_epoch_ms());
        estimate.tax_rate = tax_rate;
        estimate.client = client;
        let estimate = items
            .into_iter()
            .fold(estimate, |acc, (description, quantity, unit_price)| {
                let item = LineItem::new(acc.id, description, quantity, unit_price);
                acc.with_line_item(item)
            });

        self.estimates.create_estimate(&estimate)
    }
}

/// Replaces an estimate with a new snapshot.
pub struct UpdateEstimate {
    repo: Arc<dyn EstimateRepository>,
}

impl UpdateEstimate {
    pub fn new(repo: Arc<dyn EstimateRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for UpdateEstimate {
    type Params = Estimate;
    type Output = Estimate;

    fn execute(&self, estimate: Estimate) -> CoreResult<Estimate> {
        let name = validate::required_text(&estimate.name, EMPTY_NAME)?;
        let tax_rate = validate::tax_rate(estimate.tax_rate)?;
        let line_items = estimate
            .line_items
            .iter()
            .map(|item| {
                validate::line_item(&item.description, item.quantity, item.unit_price).map(
                    |description| LineItem {
                        estimate_id: estimate.id,
                        description,
                        ..item.clone()
                    },
                )
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let next = Estimate {
            name,
            tax_rate,
            line_items,
            ..estimate
        };
        self.repo.update_estimate(&next).context("Update estimate")
    }
}

pub struct DeleteEstimate {
    repo: Arc<dyn EstimateRepository>,
}

impl DeleteEstimate {
    pub fn new(repo: Arc<dyn EstimateRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for DeleteEstimate {
    type Params = EstimateId;
    type Output = EstimateDeletion;

    fn execute(&self, id: EstimateId) -> CoreResult<EstimateDeletion> {
        self.repo.delete_estimate(id)
    }
}

/// Resolved estimates of one project.
pub struct ListEstimates {
    repo: Arc<dyn EstimateRepository>,
}

impl ListEstimates {
    pub fn new(repo: Arc<dyn EstimateRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for ListEstimates {
    type Params = ProjectId;
    type Output = Vec<Estimate>;

    fn execute(&self, project_id: ProjectId) -> CoreResult<Vec<Estimate>> {
        self.repo.list_estimates(project_id)
    }
}

pub struct GetEstimate {
    repo: Arc<dyn EstimateRepository>,
}

impl GetEstimate {
    pub fn new(repo: Arc<dyn EstimateRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for GetEstimate {
    type Params = EstimateId;
    type Output = Estimate;

    fn execute(&self, id: EstimateId) -> CoreResult<Estimate> {
        self.repo.get_estimate(id)
    }
}
