//! # Analysis Session
//!
//! One operator session: a [`SubmissionController`] producing results and a
//! [`FindingsView`] consuming them. The result flows one way, from the
//! controller into the view, after each attempt settles. Threshold changes
//! touch only the view and never reach the backend.

use std::sync::Arc;

use nis2_client::AnalysisBackend;
use nis2_core::{AnalysisResult, ConfidenceThreshold, DerivedView, FindingsView, StagedFile};

use crate::submission::{SubmissionController, SubmissionPhase};

/// A controller, its backend, and the derived view of its latest result.
#[derive(Debug)]
pub struct AnalysisSession<B> {
    backend: B,
    controller: SubmissionController,
    findings: FindingsView,
}

impl<B: AnalysisBackend> AnalysisSession<B> {
    pub fn new(backend: B, threshold: ConfidenceThreshold) -> Self {
        Self {
            backend,
            controller: SubmissionController::new(),
            findings: FindingsView::new(threshold),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn stage_file(&mut self, file: StagedFile) {
        self.controller.stage_file(file);
    }

    /// Run one submit/fetch attempt and hand the outcome to the view.
    ///
    /// Returns `None` when nothing is staged.
    pub async fn analyze(&mut self) -> Option<SubmissionPhase> {
        let phase = self.controller.analyze(&self.backend).await?;
        self.findings.set_result(self.controller.result().cloned());
        Some(phase)
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.findings.result()
    }

    pub fn threshold(&self) -> ConfidenceThreshold {
        self.findings.threshold()
    }

    pub fn set_threshold(&mut self, threshold: ConfidenceThreshold) {
        self.findings.set_threshold(threshold);
    }

    /// The derived view for the current result and threshold.
    pub fn view(&mut self) -> Arc<DerivedView> {
        self.findings.view()
    }

    /// How many times the derived view has been recomputed.
    pub fn view_recomputations(&self) -> u64 {
        self.findings.recomputations()
    }

    /// The view layer, for event loops that adjust the threshold directly.
    pub fn findings_mut(&mut self) -> &mut FindingsView {
        &mut self.findings
    }
}
