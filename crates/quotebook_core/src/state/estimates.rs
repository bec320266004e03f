use crate::analytics::AnalyticsEvent;
use crate::model::estimate::{Estimate, EstimateId};
use crate::model::project::ProjectId;
use crate::repo::client_repo::ClientRepository;
use crate::repo::estimate_repo::EstimateRepository;
use crate::repo::failure::CoreResult;
use crate::repo::CascadeReport;
use crate::state::{FeatureHandler, Transition};
use crate::usecase::estimate::{
    CreateEstimate, CreateEstimateParams, DeleteEstimate, ListEstimates, UpdateEstimate,
};
use crate::usecase::UseCase;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum EstimatesEvent {
    /// Loads one project's estimates.
    Load { project_id: ProjectId },
    Create(CreateEstimateParams),
    Update(Estimate),
    Delete { id: EstimateId },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EstimatesData {
    Estimates(Vec<Estimate>),
    Saved(Estimate),
    Deleted {
        id: EstimateId,
        project_id: ProjectId,
        report: CascadeReport,
    },
}

/// Estimate list/editor logic. Every mutation refreshes the listing of
/// the project the touched estimate belongs to.
pub struct EstimatesHandler {
    list: ListEstimates,
    create: CreateEstimate,
    update: UpdateEstimate,
    delete: DeleteEstimate,
}

impl EstimatesHandler {
    pub fn new(
        estimates: Arc<dyn EstimateRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            list: ListEstimates::new(Arc::clone(&estimates)),
            create: CreateEstimate::new(Arc::clone(&estimates), clients),
            update: UpdateEstimate::new(Arc::clone(&estimates)),
            delete: DeleteEstimate::new(estimates),
        }
    }

    fn saved(estimate: Estimate, analytics: AnalyticsEvent) -> EstimatesTransition {
        let refresh = EstimatesEvent::Load {
            project_id: estimate.project_id,
        };
        Transition::loaded(EstimatesData::Saved(estimate))
            .with_analytics(analytics)
            .then_refresh(refresh)
    }
}

type EstimatesTransition = Transition<EstimatesData, EstimatesEvent>;

impl FeatureHandler for EstimatesHandler {
    type Event = EstimatesEvent;
    type Data = EstimatesData;

    const FEATURE: &'static str = "estimates";

    fn event_name(event: &EstimatesEvent) -> &'static str {
        match event {
            EstimatesEvent::Load { .. } => "load",
            EstimatesEvent::Create(_) => "create",
            EstimatesEvent::Update(_) => "update",
            EstimatesEvent::Delete { .. } => "delete",
        }
    }

    fn handle(&mut self, event: EstimatesEvent) -> CoreResult<EstimatesTransition> {
        match event {
            EstimatesEvent::Load { project_id } => {
                let estimates = self.list.execute(project_id)?;
                Ok(Transition::loaded(EstimatesData::Estimates(estimates)))
            }
            EstimatesEvent::Create(params) => {
                let estimate = self.create.execute(params)?;
                let analytics = AnalyticsEvent::new("estimate_created")
                    .param("estimate_id", estimate.id.to_string())
                    .param("line_items", estimate.line_items.len())
                    .param("total", estimate.total());
                Ok(Self::saved(estimate, analytics))
            }
            EstimatesEvent::Update(estimate) => {
                let estimate = self.update.execute(estimate)?;
                let analytics = AnalyticsEvent::new("estimate_updated")
                    .param("estimate_id", estimate.id.to_string())
                    .param("line_items", estimate.line_items.len());
                Ok(Self::saved(estimate, analytics))
            }
            EstimatesEvent::Delete { id } => {
                let deletion = self.delete.execute(id)?;
                let analytics = AnalyticsEvent::new("estimate_deleted")
                    .param("estimate_id", id.to_string())
                    .param("line_items_deleted", deletion.report.line_items_deleted);
                Ok(Transition::loaded(EstimatesData::Deleted {
                    id,
                    project_id: deletion.project_id,
                    report: deletion.report,
                })
                .with_analytics(analytics)
                .then_refresh(EstimatesEvent::Load {
                    project_id: deletion.project_id,
                }))
            }
        }
    }
}
