//! # Analysis Backend Trait
//!
//! The seam between the submission controller and the network. The
//! controller only ever talks to an [`AnalysisBackend`]; the production
//! implementation is [`AnalysisClient`](crate::analysis::AnalysisClient),
//! tests substitute in-process fakes.

use async_trait::async_trait;

use nis2_core::{AnalysisJobId, AnalysisResult, StagedFile};

use crate::analysis::AnalysisClient;
use crate::error::ComplianceApiError;
use crate::ComplianceClient;

/// The two calls the submission workflow needs from the backend.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Upload a document and obtain the job identifier.
    async fn submit(&self, file: &StagedFile) -> Result<AnalysisJobId, ComplianceApiError>;

    /// Fetch the finding set for a job identifier.
    async fn fetch_result(&self, id: &AnalysisJobId) -> Result<AnalysisResult, ComplianceApiError>;
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn submit(&self, file: &StagedFile) -> Result<AnalysisJobId, ComplianceApiError> {
        AnalysisClient::submit(self, file).await
    }

    async fn fetch_result(&self, id: &AnalysisJobId) -> Result<AnalysisResult, ComplianceApiError> {
        AnalysisClient::fetch_result(self, id).await
    }
}

#[async_trait]
impl AnalysisBackend for ComplianceClient {
    async fn submit(&self, file: &StagedFile) -> Result<AnalysisJobId, ComplianceApiError> {
        self.analysis().submit(file).await
    }

    async fn fetch_result(&self, id: &AnalysisJobId) -> Result<AnalysisResult, ComplianceApiError> {
        self.analysis().fetch_result(id).await
    }
}
