//! # nis2-state: Submission Workflow State Machine
//!
//! Implements the request lifecycle of the NIS2 compliance mapper and the
//! session that connects it to the derived findings view.
//!
//! ## State Machines
//!
//! - **Submission** (`submission.rs`): `Idle → Submitting → AwaitingResult →
//!   Succeeded`, with `Failed` reachable from both in-flight phases. Every
//!   accepted invocation mints a new attempt number; completions of
//!   superseded attempts are discarded.
//!
//! - **Session** (`session.rs`): one controller plus one memoized
//!   `FindingsView`. Successful results flow from the controller into the
//!   view; threshold changes recompute the view without any network call.
//!
//! ## Concurrency
//!
//! Single-threaded and event-driven. The only suspension points are the
//! upload and fetch calls. State is mutated between suspension points, so
//! no locks are needed; [`drive_attempt`] shares a controller through a
//! `RefCell` on one event loop.

pub mod error;
pub mod session;
pub mod submission;

pub use error::{SubmissionError, FETCH_FAILED_MESSAGE, SUBMISSION_FAILED_MESSAGE};
pub use session::AnalysisSession;
pub use submission::{
    drive_attempt, AnalysisAttempt, Completion, SubmissionController, SubmissionPhase,
    TransitionRecord,
};
