//! # Submission Controller
//!
//! Owns the lifecycle of one analysis request: a staged file is uploaded,
//! the returned job id is used to fetch the result, and the controller
//! settles in `Succeeded` or `Failed`.
//!
//! ## States
//!
//! ```text
//!          stage_file()
//!            ┌────┐
//!            ▼    │
//!          Idle ──┘
//!            │ begin() [file staged]
//!            ▼
//!       Submitting ──upload fails──▶ Failed
//!            │ upload ok                 ▲
//!            ▼                           │
//!     AwaitingResult ──fetch fails───────┘
//!            │ fetch ok
//!            ▼
//!        Succeeded
//!
//! begin() is accepted from every state and starts a fresh attempt.
//! ```
//!
//! ## Design Decision
//!
//! The lifecycle uses an enum with checked transitions rather than
//! typestate types. The controller is a long-lived state holder that an
//! event loop mutates in place, and `begin()` is legal from every state,
//! so distinct types per state would buy nothing.
//!
//! ## Stale Completions
//!
//! Every accepted `begin()` mints a new [`AttemptId`]. The two completion
//! methods take the attempt they belong to and apply only if it is still
//! the current attempt. A completion from a superseded attempt is
//! discarded and leaves no trace in the state or the transition log.

use std::cell::RefCell;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nis2_client::AnalysisBackend;
use nis2_core::{AnalysisJobId, AnalysisResult, AttemptId, StagedFile};

use crate::error::SubmissionError;

// ─── Phase ───────────────────────────────────────────────────────────

/// Where the controller is in the submit/fetch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmissionPhase {
    /// Nothing in flight and nothing settled yet.
    #[default]
    Idle,
    /// The upload call is in flight.
    Submitting,
    /// The upload succeeded; the result fetch is in flight.
    AwaitingResult,
    /// The latest attempt produced a result.
    Succeeded,
    /// The latest attempt failed; see [`SubmissionController::error`].
    Failed,
}

impl SubmissionPhase {
    /// Whether a request is in flight. The analyze trigger is disabled while busy.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting | Self::AwaitingResult)
    }

    /// Whether the latest attempt has settled.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Submitting => "SUBMITTING",
            Self::AwaitingResult => "AWAITING_RESULT",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// One accepted phase change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub attempt: AttemptId,
    pub from_state: SubmissionPhase,
    pub to_state: SubmissionPhase,
    pub timestamp: DateTime<Utc>,
}

/// Whether a completion was applied or dropped as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The completion belongs to a superseded attempt, or arrived in a
    /// phase that does not expect it.
    Stale,
}

// ─── Attempt ─────────────────────────────────────────────────────────

/// Ticket for one accepted analyze invocation.
///
/// Carries its own handle to the staged payload, so staging a replacement
/// file mid-flight does not alter what this attempt uploads.
#[derive(Debug, Clone)]
pub struct AnalysisAttempt {
    id: AttemptId,
    file: StagedFile,
}

impl AnalysisAttempt {
    pub fn id(&self) -> AttemptId {
        self.id
    }

    pub fn file(&self) -> &StagedFile {
        &self.file
    }
}

// ─── Controller ──────────────────────────────────────────────────────

/// State holder for the submit → fetch workflow.
#[derive(Debug, Default)]
pub struct SubmissionController {
    staged: Option<StagedFile>,
    phase: SubmissionPhase,
    current_attempt: AttemptId,
    job_id: Option<AnalysisJobId>,
    result: Option<Arc<AnalysisResult>>,
    error: Option<SubmissionError>,
    transitions: Vec<TransitionRecord>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    /// The attempt whose completions are currently authoritative.
    pub fn current_attempt(&self) -> AttemptId {
        self.current_attempt
    }

    /// The job id of the in-flight fetch, if one is pending.
    pub fn job_id(&self) -> Option<&AnalysisJobId> {
        self.job_id.as_ref()
    }

    /// The most recent successfully fetched result.
    ///
    /// Survives a later failed attempt; replaced by the next success.
    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.result.as_ref()
    }

    /// The single live error message, if the latest attempt failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(SubmissionError::message)
    }

    pub fn last_error(&self) -> Option<&SubmissionError> {
        self.error.as_ref()
    }

    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Stage (or replace) the file to analyze. No network effect, no phase change.
    pub fn stage_file(&mut self, file: StagedFile) {
        tracing::debug!(file = file.file_name(), bytes = file.len(), "file staged");
        self.staged = Some(file);
    }

    /// Accept an analyze invocation.
    ///
    /// Returns `None` and changes nothing when no file is staged. Otherwise
    /// supersedes any in-flight attempt, clears the live error, moves to
    /// `Submitting`, and returns the ticket for the new attempt.
    pub fn begin(&mut self) -> Option<AnalysisAttempt> {
        let file = self.staged.clone()?;

        self.current_attempt = self.current_attempt.next();
        self.job_id = None;
        self.error = None;
        self.transition(SubmissionPhase::Submitting);

        Some(AnalysisAttempt {
            id: self.current_attempt,
            file,
        })
    }

    /// Apply the outcome of the upload call of `attempt`.
    pub fn complete_submission(
        &mut self,
        attempt: AttemptId,
        outcome: Result<AnalysisJobId, SubmissionError>,
    ) -> Completion {
        if !self.accepts(attempt, SubmissionPhase::Submitting) {
            return Completion::Stale;
        }
        match outcome {
            Ok(job_id) => {
                tracing::debug!(attempt = %attempt, job = %job_id, "upload acknowledged");
                self.job_id = Some(job_id);
                self.transition(SubmissionPhase::AwaitingResult);
            }
            Err(err) => self.fail(err),
        }
        Completion::Applied
    }

    /// Apply the outcome of the result fetch of `attempt`.
    ///
    /// The job id is discarded whether the fetch succeeded or not.
    pub fn complete_fetch(
        &mut self,
        attempt: AttemptId,
        outcome: Result<AnalysisResult, SubmissionError>,
    ) -> Completion {
        if !self.accepts(attempt, SubmissionPhase::AwaitingResult) {
            return Completion::Stale;
        }
        self.job_id = None;
        match outcome {
            Ok(result) => {
                tracing::debug!(
                    attempt = %attempt,
                    findings = result.findings.len(),
                    model = %result.model_metadata.model_name,
                    "analysis result received"
                );
                self.result = Some(Arc::new(result));
                self.transition(SubmissionPhase::Succeeded);
            }
            Err(err) => self.fail(err),
        }
        Completion::Applied
    }

    /// Run one full attempt against `backend`: upload, then (only if the
    /// upload succeeded) fetch.
    ///
    /// Returns `None` without touching the network when nothing is staged,
    /// otherwise the phase the attempt settled in.
    pub async fn analyze<B>(&mut self, backend: &B) -> Option<SubmissionPhase>
    where
        B: AnalysisBackend + ?Sized,
    {
        let attempt = self.begin()?;

        let submitted = backend
            .submit(attempt.file())
            .await
            .map_err(|e| SubmissionError::from_submit(&e));
        let job_id = submitted.as_ref().ok().cloned();
        self.complete_submission(attempt.id(), submitted);

        if let Some(job_id) = job_id {
            let fetched = backend
                .fetch_result(&job_id)
                .await
                .map_err(|e| SubmissionError::from_fetch(&e));
            self.complete_fetch(attempt.id(), fetched);
        }

        Some(self.phase)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn accepts(&self, attempt: AttemptId, expected: SubmissionPhase) -> bool {
        if attempt != self.current_attempt {
            tracing::debug!(
                attempt = %attempt,
                current = %self.current_attempt,
                "discarding completion of superseded attempt"
            );
            return false;
        }
        if self.phase != expected {
            tracing::debug!(
                attempt = %attempt,
                phase = %self.phase,
                expected = %expected,
                "discarding completion outside its phase"
            );
            return false;
        }
        true
    }

    fn fail(&mut self, err: SubmissionError) {
        tracing::warn!(attempt = %self.current_attempt, error = %err, "analysis attempt failed");
        self.job_id = None;
        self.error = Some(err);
        self.transition(SubmissionPhase::Failed);
    }

    fn transition(&mut self, to: SubmissionPhase) {
        let from = self.phase;
        self.phase = to;
        tracing::info!(attempt = %self.current_attempt, from = %from, to = %to, "submission phase changed");
        self.transitions.push(TransitionRecord {
            attempt: self.current_attempt,
            from_state: from,
            to_state: to,
            timestamp: Utc::now(),
        });
    }
}

/// Run one attempt against a controller shared on a single-threaded event loop.
///
/// The controller is borrowed only between suspension points, so other
/// events (staging a new file, starting another attempt) may be handled
/// while this attempt's calls are in flight. If the attempt is superseded
/// while its upload is in flight, the fetch is not issued.
///
/// Returns the attempt that was run, or `None` when nothing was staged.
pub async fn drive_attempt<B>(controller: &RefCell<SubmissionController>, backend: &B) -> Option<AttemptId>
where
    B: AnalysisBackend + ?Sized,
{
    let attempt = controller.borrow_mut().begin()?;
    let id = attempt.id();

    let submitted = backend
        .submit(attempt.file())
        .await
        .map_err(|e| SubmissionError::from_submit(&e));
    let job_id = submitted.as_ref().ok().cloned();
    let applied = controller.borrow_mut().complete_submission(id, submitted);

    if let (Completion::Applied, Some(job_id)) = (applied, job_id) {
        let fetched = backend
            .fetch_result(&job_id)
            .await
            .map_err(|e| SubmissionError::from_fetch(&e));
        controller.borrow_mut().complete_fetch(id, fetched);
    }

    Some(id)
}
