//! # Submission Errors
//!
//! The two failure kinds of the submit/fetch workflow. Both are recovered
//! locally: the controller moves to `Failed`, the message becomes the
//! single live error, and the operator may retry.
//!
//! Invoking analysis with nothing staged is not an error; it is a no-op.

use thiserror::Error;

use nis2_client::ComplianceApiError;

/// Message shown when the backend rejects the upload.
pub const SUBMISSION_FAILED_MESSAGE: &str = "Analyze request failed";

/// Message shown when the backend rejects the result fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Fetching results failed";

/// A failed phase of one analysis attempt, carrying the user-visible text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The upload call did not succeed.
    #[error("{message}")]
    SubmissionFailed { message: String },

    /// The result fetch did not succeed after a successful upload.
    #[error("{message}")]
    FetchFailed { message: String },
}

impl SubmissionError {
    /// Classify a failed upload.
    ///
    /// A non-2xx answer becomes [`SUBMISSION_FAILED_MESSAGE`]; a transport or
    /// decoding failure keeps the underlying error text.
    pub fn from_submit(err: &ComplianceApiError) -> Self {
        Self::SubmissionFailed {
            message: user_message(err, SUBMISSION_FAILED_MESSAGE),
        }
    }

    /// Classify a failed result fetch.
    pub fn from_fetch(err: &ComplianceApiError) -> Self {
        Self::FetchFailed {
            message: user_message(err, FETCH_FAILED_MESSAGE),
        }
    }

    /// The human-readable message surfaced to the operator.
    pub fn message(&self) -> &str {
        match self {
            Self::SubmissionFailed { message } | Self::FetchFailed { message } => message,
        }
    }
}

fn user_message(err: &ComplianceApiError, rejected: &str) -> String {
    match err {
        ComplianceApiError::ApiError { .. } => rejected.to_string(),
        ComplianceApiError::Http { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
