//! # nis2-core: Foundational Types for the NIS2 Compliance Mapper
//!
//! Defines the data model shared by every other crate in the workspace:
//! the finding set returned by the compliance-analysis backend, the file
//! staged for submission, the operator's confidence threshold, and the
//! derived view (filtered findings plus per-domain counts) computed from
//! them.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `AnalysisJobId` and `AttemptId`
//!    are distinct types. A job id handed out by the backend cannot be
//!    confused with the controller's local attempt counter.
//!
//! 2. **Validated threshold.** `ConfidenceThreshold` can only hold a value
//!    in `[0, 1]`. NaN is rejected at construction.
//!
//! 3. **Pure derivation.** [`derive_view`] is a pure function of the result
//!    and the threshold. [`FindingsView`] memoizes it on exactly those two
//!    inputs so unrelated state changes never trigger recomputation.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `nis2-*` crates (this is the leaf of the DAG).
//! - No I/O, no async.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod finding;
pub mod identity;
pub mod staged;
pub mod threshold;
pub mod view;

// Re-export primary types for ergonomic imports.
pub use error::ThresholdError;
pub use finding::{AnalysisResult, Finding, ModelMetadata};
pub use identity::{AnalysisJobId, AttemptId};
pub use staged::{SourceType, StagedFile};
pub use threshold::ConfidenceThreshold;
pub use view::{derive_view, DerivedView, DomainSlice, FindingsView};
