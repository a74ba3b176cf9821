//! Typed client for the analysis endpoints of the compliance backend.
//!
//! ## API Paths (relative to the configured base URL)
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/analyze` | Upload a document (multipart field `file`), returns `analysis_id` |
//! | GET    | `/results/{analysis_id}` | Fetch model metadata and findings |
//!
//! Each call is issued exactly once. There is no retry: a transport
//! failure or non-2xx status is returned to the caller as-is.

use serde::Deserialize;
use url::Url;

use nis2_core::{AnalysisJobId, AnalysisResult, StagedFile};

use crate::config::ConfigError;
use crate::error::ComplianceApiError;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

// -- Response types -----------------------------------------------------------

/// Acknowledgement returned by `POST /analyze`.
///
/// Only `analysis_id` is required; other keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub analysis_id: AnalysisJobId,
}

// -- Client -------------------------------------------------------------------

/// Client for the submit/fetch pair of analysis endpoints.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AnalysisClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Upload a staged document for analysis.
    ///
    /// Calls `POST {base_url}/analyze` with a multipart body whose single
    /// field `file` carries the payload and its file name.
    pub async fn submit(&self, file: &StagedFile) -> Result<AnalysisJobId, ComplianceApiError> {
        let endpoint = "POST /analyze";
        let url = self.endpoint_url(&["analyze"])?;

        let part = reqwest::multipart::Part::bytes(file.contents().to_vec())
            .file_name(file.file_name().to_string());
        let form = reqwest::multipart::Form::new().part(FILE_FIELD, part);

        tracing::trace!(%url, file = file.file_name(), bytes = file.len(), "submitting document");

        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ComplianceApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ComplianceApiError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let ack: SubmitResponse = resp.json().await.map_err(|e| ComplianceApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        Ok(ack.analysis_id)
    }

    /// Fetch the result of a previously submitted analysis job.
    ///
    /// Calls `GET {base_url}/results/{analysis_id}`. The identifier is
    /// percent-encoded as a single path segment.
    pub async fn fetch_result(&self, id: &AnalysisJobId) -> Result<AnalysisResult, ComplianceApiError> {
        let endpoint = format!("GET /results/{}", id.as_str());
        let url = self.endpoint_url(&["results", id.as_str()])?;

        tracing::trace!(%url, "fetching analysis result");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ComplianceApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ComplianceApiError::ApiError {
                endpoint,
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| ComplianceApiError::Deserialization {
            endpoint,
            source: e,
        })
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ComplianceApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ConfigError::InvalidUrl(
                    self.base_url.to_string(),
                    "URL cannot carry path segments".to_string(),
                )
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> AnalysisClient {
        AnalysisClient::new(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_url_appends_to_base_path() {
        let c = client("http://127.0.0.1:8000/api/v1");
        assert_eq!(
            c.endpoint_url(&["analyze"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/analyze"
        );
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash() {
        let c = client("http://127.0.0.1:8000/api/v1/");
        assert_eq!(
            c.endpoint_url(&["results", "abc"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/results/abc"
        );
        let root = client("http://127.0.0.1:9000");
        assert_eq!(
            root.endpoint_url(&["analyze"]).unwrap().as_str(),
            "http://127.0.0.1:9000/analyze"
        );
    }

    #[test]
    fn endpoint_url_encodes_job_id_as_one_segment() {
        let c = client("http://127.0.0.1:8000/api/v1");
        assert_eq!(
            c.endpoint_url(&["results", "a/b c"]).unwrap().as_str(),
            "http://127.0.0.1:8000/api/v1/results/a%2Fb%20c"
        );
    }

    #[test]
    fn submit_response_ignores_extra_keys() {
        let ack: SubmitResponse =
            serde_json::from_str(r#"{"analysis_id":"abc","queued":true}"#).unwrap();
        assert_eq!(ack.analysis_id, AnalysisJobId::new("abc"));
    }
}
