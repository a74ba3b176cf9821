//! # Error Types
//!
//! The core crate has a single failure mode: constructing a
//! [`ConfidenceThreshold`](crate::ConfidenceThreshold) from an out-of-range
//! value. Deriving the findings view is infallible.

use thiserror::Error;

/// A confidence threshold outside `[0, 1]` (or NaN) was supplied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    /// The value is not a number.
    #[error("confidence threshold must be a number, got NaN")]
    NotANumber,

    /// The value lies outside the closed unit interval.
    #[error("confidence threshold must be within [0, 1], got {0}")]
    OutOfRange(f64),

    /// The input text could not be parsed as a number.
    #[error("invalid confidence threshold {0:?}: expected a number within [0, 1]")]
    Unparseable(String),
}
