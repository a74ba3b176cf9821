//! # Analysis Result Model
//!
//! Types matching the JSON document returned by
//! `GET {base_url}/results/{analysis_id}`.
//!
//! Fields beyond the required core use `#[serde(default)]` so that older or
//! newer backends deserialize cleanly. `deny_unknown_fields` is NOT used:
//! the backend may return additional keys that this client ignores.

use serde::{Deserialize, Serialize};

use crate::identity::AnalysisJobId;
use crate::staged::SourceType;

/// One compliance-relevant statement extracted from the submitted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The sentence the finding was extracted from.
    pub source_text: String,
    /// The control the statement maps to (e.g. "Audit Logging & Monitoring").
    pub identified_control: String,
    /// The NIS2 domain the statement was classified into.
    pub nis2_domain: String,
    /// Calibrated confidence in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable explanation of how the confidence was reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Raw classifier score before calibration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_score: Option<f64>,
    /// Classifier latency for this statement, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_ms: Option<f64>,
    /// Kind of document the statement came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
}

impl Finding {
    /// Build a finding with only the four required fields populated.
    pub fn new(
        source_text: impl Into<String>,
        identified_control: impl Into<String>,
        nis2_domain: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            identified_control: identified_control.into(),
            nis2_domain: nis2_domain.into(),
            confidence,
            reasoning: None,
            model_score: None,
            inference_ms: None,
            source_type: None,
        }
    }
}

/// Description of the model that produced the findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// Any further metadata keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ModelMetadata {
    pub fn named(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            model_type: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// The finding set and model metadata for one completed analysis job.
///
/// Immutable once received. Consumers hold it behind an `Arc` so the
/// derived view can key its cache on pointer identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub model_metadata: ModelMetadata,
    /// Ordered as returned by the backend. Order is preserved by filtering.
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<AnalysisJobId>,
    /// Backend completion time, kept as the opaque string the backend sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_processing_ms: Option<f64>,
}

impl AnalysisResult {
    /// Build a result with no optional metadata.
    pub fn new(model_metadata: ModelMetadata, findings: Vec<Finding>) -> Self {
        Self {
            model_metadata,
            findings,
            analysis_id: None,
            timestamp: None,
            total_processing_ms: None,
        }
    }
}
