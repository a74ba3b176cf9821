//! # Confidence Threshold
//!
//! The operator-adjustable cutoff below which findings are hidden.
//! Always within `[0, 1]`; default `0.5`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThresholdError;

/// A validated confidence cutoff in `[0, 1]`.
///
/// A finding passes when `finding.confidence >= threshold`, so `0.0` admits
/// every finding and `1.0` admits only findings with confidence exactly `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceThreshold(f64);

impl ConfidenceThreshold {
    /// Threshold applied before the operator touches the control.
    pub const DEFAULT: ConfidenceThreshold = ConfidenceThreshold(0.5);

    /// Granularity of one adjustment step.
    pub const STEP: f64 = 0.01;

    pub const MIN: ConfidenceThreshold = ConfidenceThreshold(0.0);
    pub const MAX: ConfidenceThreshold = ConfidenceThreshold(1.0);

    /// Validate and wrap a threshold value.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError::NotANumber`] for NaN and
    /// [`ThresholdError::OutOfRange`] for values outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if value.is_nan() {
            return Err(ThresholdError::NotANumber);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ThresholdError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether a confidence score clears this threshold.
    pub fn admits(self, confidence: f64) -> bool {
        confidence >= self.0
    }

    /// Move by `steps` whole [`STEP`](Self::STEP)s, clamped to `[0, 1]`.
    ///
    /// The result is snapped to the step grid, so repeated nudges do not
    /// accumulate floating-point drift.
    pub fn nudge(self, steps: i32) -> Self {
        let grid = (self.0 / Self::STEP).round() + f64::from(steps);
        let snapped = (grid * Self::STEP * 100.0).round() / 100.0;
        Self(snapped.clamp(0.0, 1.0))
    }
}

impl Default for ConfidenceThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for ConfidenceThreshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceThreshold> for f64 {
    fn from(t: ConfidenceThreshold) -> f64 {
        t.0
    }
}

impl FromStr for ConfidenceThreshold {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| ThresholdError::Unparseable(s.to_string()))?;
        Self::new(value)
    }
}

impl std::fmt::Display for ConfidenceThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_half() {
        assert_eq!(ConfidenceThreshold::default().value(), 0.5);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(ConfidenceThreshold::new(0.0).is_ok());
        assert!(ConfidenceThreshold::new(1.0).is_ok());
        assert_eq!(
            ConfidenceThreshold::new(1.01),
            Err(ThresholdError::OutOfRange(1.01))
        );
        assert_eq!(
            ConfidenceThreshold::new(-0.1),
            Err(ThresholdError::OutOfRange(-0.1))
        );
        assert_eq!(
            ConfidenceThreshold::new(f64::NAN),
            Err(ThresholdError::NotANumber)
        );
    }

    #[test]
    fn admits_is_greater_or_equal() {
        let t = ConfidenceThreshold::new(0.7).unwrap();
        assert!(t.admits(0.7));
        assert!(t.admits(0.71));
        assert!(!t.admits(0.69));
        assert!(ConfidenceThreshold::MAX.admits(1.0));
        assert!(!ConfidenceThreshold::MAX.admits(0.9999));
        assert!(ConfidenceThreshold::MIN.admits(0.0));
    }

    #[test]
    fn nudge_snaps_and_clamps() {
        let t = ConfidenceThreshold::default();
        assert_eq!(t.nudge(1).value(), 0.51);
        assert_eq!(t.nudge(-3).value(), 0.47);
        assert_eq!(ConfidenceThreshold::MAX.nudge(5), ConfidenceThreshold::MAX);
        assert_eq!(ConfidenceThreshold::MIN.nudge(-5), ConfidenceThreshold::MIN);

        let mut walked = ConfidenceThreshold::MIN;
        for _ in 0..30 {
            walked = walked.nudge(1);
        }
        assert_eq!(walked.value(), 0.3);
    }

    #[test]
    fn parses_from_text() {
        assert_eq!("0.25".parse::<ConfidenceThreshold>().unwrap().value(), 0.25);
        assert_eq!(" 1 ".parse::<ConfidenceThreshold>().unwrap().value(), 1.0);
        assert!(matches!(
            "high".parse::<ConfidenceThreshold>(),
            Err(ThresholdError::Unparseable(_))
        ));
        assert!(matches!(
            "2".parse::<ConfidenceThreshold>(),
            Err(ThresholdError::OutOfRange(_))
        ));
    }

    #[test]
    fn deserialization_validates() {
        let t: ConfidenceThreshold = serde_json::from_str("0.8").unwrap();
        assert_eq!(t.value(), 0.8);
        assert!(serde_json::from_str::<ConfidenceThreshold>("1.5").is_err());
        assert_eq!(serde_json::to_string(&t).unwrap(), "0.8");
    }
}
