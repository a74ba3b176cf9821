//! # Derived Findings View
//!
//! Turns a raw [`AnalysisResult`] and a [`ConfidenceThreshold`] into what
//! the table and the chart consume:
//!
//! - `filtered`: the findings with `confidence >= threshold`, in the
//!   backend's order.
//! - `domain_counts`: how many filtered findings fall into each NIS2 domain.
//!
//! ## Invariants
//!
//! - `filtered` is exactly the order-preserving subsequence of the result's
//!   findings admitted by the threshold.
//! - `domain_counts` is exactly the multiset count of `nis2_domain` over
//!   `filtered`; its values sum to `filtered.len()`.
//! - A view is never mutated. A changed input produces a new view.
//!
//! ## Memoization
//!
//! [`derive_view`] is pure. [`FindingsView`] caches its output keyed on
//! the identity of the `Arc<AnalysisResult>` and the threshold value, so
//! asking for the view while neither input changed returns the same `Arc`
//! without touching the findings.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::finding::{AnalysisResult, Finding};
use crate::threshold::ConfidenceThreshold;

/// One `{name, value}` entry of the domain-distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainSlice {
    pub name: String,
    pub value: usize,
}

/// The filtered findings and their per-domain aggregation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DerivedView {
    pub filtered: Vec<Finding>,
    pub domain_counts: BTreeMap<String, usize>,
}

impl DerivedView {
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Chart data, one slice per domain, in order of each domain's first
    /// appearance in `filtered`.
    pub fn chart_data(&self) -> Vec<DomainSlice> {
        let mut slices: Vec<DomainSlice> = Vec::with_capacity(self.domain_counts.len());
        for finding in &self.filtered {
            if slices.iter().any(|s| s.name == finding.nis2_domain) {
                continue;
            }
            let value = self
                .domain_counts
                .get(&finding.nis2_domain)
                .copied()
                .unwrap_or_default();
            slices.push(DomainSlice {
                name: finding.nis2_domain.clone(),
                value,
            });
        }
        slices
    }
}

/// Derive the view for `result` at `threshold`.
///
/// An absent result ("no analysis yet") yields an empty view.
pub fn derive_view(result: Option<&AnalysisResult>, threshold: ConfidenceThreshold) -> DerivedView {
    let Some(result) = result else {
        return DerivedView::default();
    };

    let filtered: Vec<Finding> = result
        .findings
        .iter()
        .filter(|f| threshold.admits(f.confidence))
        .cloned()
        .collect();

    let mut domain_counts: BTreeMap<String, usize> = BTreeMap::new();
    for finding in &filtered {
        *domain_counts.entry(finding.nis2_domain.clone()).or_insert(0) += 1;
    }

    DerivedView {
        filtered,
        domain_counts,
    }
}

/// Memoizing holder of the two view inputs.
///
/// Setting an input only records it; the view is re-derived lazily on the
/// next [`view`](Self::view) call, and only if the inputs differ from the
/// ones the cached view was computed from.
#[derive(Debug, Default)]
pub struct FindingsView {
    result: Option<Arc<AnalysisResult>>,
    threshold: ConfidenceThreshold,
    cache: Option<CachedView>,
    recomputations: u64,
}

#[derive(Debug)]
struct CachedView {
    result: Option<Arc<AnalysisResult>>,
    threshold: ConfidenceThreshold,
    view: Arc<DerivedView>,
}

impl CachedView {
    fn matches(&self, result: &Option<Arc<AnalysisResult>>, threshold: ConfidenceThreshold) -> bool {
        let same_result = match (&self.result, result) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_result && self.threshold == threshold
    }
}

impl FindingsView {
    pub fn new(threshold: ConfidenceThreshold) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        self.result.as_ref()
    }

    pub fn threshold(&self) -> ConfidenceThreshold {
        self.threshold
    }

    /// Replace the analysis result. `None` means "no analysis yet".
    pub fn set_result(&mut self, result: Option<Arc<AnalysisResult>>) {
        self.result = result;
    }

    pub fn set_threshold(&mut self, threshold: ConfidenceThreshold) {
        self.threshold = threshold;
    }

    /// The view for the current inputs, recomputed only if they changed.
    pub fn view(&mut self) -> Arc<DerivedView> {
        if let Some(cached) = &self.cache {
            if cached.matches(&self.result, self.threshold) {
                tracing::trace!(threshold = %self.threshold, "findings view cache hit");
                return Arc::clone(&cached.view);
            }
        }

        let view = Arc::new(derive_view(self.result.as_deref(), self.threshold));
        self.recomputations += 1;
        tracing::debug!(
            threshold = %self.threshold,
            filtered = view.len(),
            domains = view.domain_counts.len(),
            "findings view recomputed"
        );
        self.cache = Some(CachedView {
            result: self.result.clone(),
            threshold: self.threshold,
            view: Arc::clone(&view),
        });
        view
    }

    /// How many times the view has actually been derived.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
