//! # nis2-client: Typed Rust client for the compliance-analysis backend
//!
//! Provides typed access to the two endpoints of the analysis workflow:
//! - **Submit** via `POST {base_url}/analyze` (multipart upload)
//! - **Fetch** via `GET {base_url}/results/{analysis_id}`
//!
//! ## Architecture
//!
//! This crate is the only path through which the workspace talks to the
//! backend. The submission controller in `nis2-state` depends on the
//! [`AnalysisBackend`] trait rather than on the concrete client, so the
//! workflow can be exercised without a network.
//!
//! ## Timeouts
//!
//! Every request carries the configured timeout (default 30 s). A backend
//! that never answers therefore surfaces as a transport error instead of an
//! unbounded wait.

pub mod analysis;
pub mod backend;
pub mod config;
pub mod error;

pub use analysis::AnalysisClient;
pub use backend::AnalysisBackend;
pub use config::{ComplianceApiConfig, ConfigError, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::ComplianceApiError;

/// Top-level compliance API client.
#[derive(Debug, Clone)]
pub struct ComplianceClient {
    analysis: analysis::AnalysisClient,
}

impl ComplianceClient {
    /// Create a new client from configuration.
    pub fn new(config: ComplianceApiConfig) -> Result<Self, ComplianceApiError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("nis2-mapper/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ComplianceApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "compliance client ready");

        Ok(Self {
            analysis: analysis::AnalysisClient::new(http, config.base_url),
        })
    }

    /// Access the analysis (submit/fetch) client.
    pub fn analysis(&self) -> &analysis::AnalysisClient {
        &self.analysis
    }
}
