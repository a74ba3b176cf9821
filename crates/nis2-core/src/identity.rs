//! # Identifier Newtypes
//!
//! Newtype wrappers for the two identifiers in the submission workflow.
//! `AnalysisJobId` is opaque and minted by the backend; `AttemptId` is a
//! local, monotonically increasing counter minted by the controller.

use serde::{Deserialize, Serialize};

/// Opaque identifier of an analysis job, returned by the backend on a
/// successful submission and used to fetch the job's result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisJobId(String);

impl AnalysisJobId {
    /// Wrap a backend-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the raw identifier, as sent back to the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnalysisJobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "analysis:{}", self.0)
    }
}

/// Sequence number of one `analyze` invocation.
///
/// Strictly increasing per controller. A completion carrying an attempt
/// older than the controller's current attempt is stale and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AttemptId(u64);

impl AttemptId {
    /// The attempt number before any invocation.
    pub const ZERO: AttemptId = AttemptId(0);

    /// The attempt that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "attempt#{}", self.0)
    }
}
