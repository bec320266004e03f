//! Integrity maintenance operations.

use crate::repo::failure::CoreResult;
use crate::repo::integrity_repo::{IntegrityReport, IntegrityRepository};
use crate::usecase::UseCase;
use std::sync::Arc;

pub struct ScanIntegrity {
    repo: Arc<dyn IntegrityRepository>,
}

impl ScanIntegrity {
    pub fn new(repo: Arc<dyn IntegrityRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for ScanIntegrity {
    type Params = ();
    type Output = IntegrityReport;

    fn execute(&self, _params: ()) -> CoreResult<IntegrityReport> {
        self.repo.scan()
    }
}

/// Removes orphaned estimates and line items left by interrupted writes.
pub struct RepairIntegrity {
    repo: Arc<dyn IntegrityRepository>,
}

impl RepairIntegrity {
    pub fn new(repo: Arc<dyn IntegrityRepository>) -> Self {
        Self { repo }
    }
}

impl UseCase for RepairIntegrity {
    type Params = ();
    type Output = IntegrityReport;

    fn execute(&self, _params: ()) -> CoreResult<IntegrityReport> {
        self.repo.repair()
    }
}
