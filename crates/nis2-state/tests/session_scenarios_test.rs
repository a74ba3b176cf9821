//! End-to-end session scenarios against a mocked compliance backend.
//!
//! Each test wires a real `ComplianceClient` to a wiremock server, drives
//! an `AnalysisSession`, and checks both the controller's final state and
//! the derived view.

use nis2_client::{ComplianceApiConfig, ComplianceClient};
use nis2_core::{ConfidenceThreshold, StagedFile};
use nis2_state::{AnalysisSession, SubmissionError, SubmissionPhase};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(mock_server: &MockServer) -> AnalysisSession<ComplianceClient> {
    let config = ComplianceApiConfig {
        base_url: format!("{}/api/v1", mock_server.uri()).parse().unwrap(),
        timeout_secs: 5,
    };
    AnalysisSession::new(
        ComplianceClient::new(config).unwrap(),
        ConfidenceThreshold::default(),
    )
}

fn policy_pdf() -> StagedFile {
    StagedFile::new("policy.pdf", b"%PDF-1.7 fake".to_vec())
}

async fn mount_submit_ok(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "analysis_id": "abc"
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

async fn mount_fetch_ok(mock_server: &MockServer, findings: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/results/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model_metadata": { "model_name": "M1" },
            "findings": findings
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn no_staged_file_leaves_session_idle() {
    let mock_server = MockServer::start().await;
    let mut s = session(&mock_server);

    assert_eq!(s.analyze().await, None);
    assert_eq!(s.controller().phase(), SubmissionPhase::Idle);
    assert_eq!(s.controller().error(), None);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_analysis_populates_view() {
    let mock_server = MockServer::start().await;
    mount_submit_ok(&mock_server).await;
    mount_fetch_ok(
        &mock_server,
        serde_json::json!([{
            "source_text": "t1",
            "identified_control": "c1",
            "nis2_domain": "Risk",
            "confidence": 0.9
        }]),
    )
    .await;

    let mut s = session(&mock_server);
    s.stage_file(policy_pdf());

    assert_eq!(s.analyze().await, Some(SubmissionPhase::Succeeded));
    assert_eq!(s.result().unwrap().model_metadata.model_name, "M1");

    let view = s.view();
    assert_eq!(view.len(), 1);
    assert_eq!(view.filtered[0].source_text, "t1");
    assert_eq!(view.domain_counts.len(), 1);
    assert_eq!(view.domain_counts["Risk"], 1);
}

#[tokio::test]
async fn rejected_upload_fails_without_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "detail": "model unavailable"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut s = session(&mock_server);
    s.stage_file(policy_pdf());

    assert_eq!(s.analyze().await, Some(SubmissionPhase::Failed));
    assert_eq!(s.controller().error(), Some("Analyze request failed"));
    assert!(matches!(
        s.controller().last_error(),
        Some(SubmissionError::SubmissionFailed { .. })
    ));
    assert!(s.result().is_none());
}

#[tokio::test]
async fn rejected_fetch_fails_and_job_id_is_dropped() {
    let mock_server = MockServer::start().await;
    mount_submit_ok(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results/abc"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Not found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut s = session(&mock_server);
    s.stage_file(policy_pdf());

    assert_eq!(s.analyze().await, Some(SubmissionPhase::Failed));
    assert_eq!(s.controller().error(), Some("Fetching results failed"));
    assert!(matches!(
        s.controller().last_error(),
        Some(SubmissionError::FetchFailed { .. })
    ));
    assert_eq!(s.controller().job_id(), None);
}

#[tokio::test]
async fn raising_threshold_empties_view_without_network() {
    let mock_server = MockServer::start().await;
    mount_submit_ok(&mock_server).await;
    mount_fetch_ok(
        &mock_server,
        serde_json::json!([
            { "source_text": "t1", "identified_control": "c1", "nis2_domain": "Risk", "confidence": 0.9 },
            { "source_text": "t2", "identified_control": "c2", "nis2_domain": "Incident Handling", "confidence": 0.6 }
        ]),
    )
    .await;

    let mut s = session(&mock_server);
    s.stage_file(policy_pdf());
    s.analyze().await;
    assert_eq!(s.view().len(), 2);
    let requests_before = mock_server.received_requests().await.unwrap().len();

    s.set_threshold(ConfidenceThreshold::new(0.95).unwrap());
    let view = s.view();
    assert!(view.is_empty());
    assert!(view.domain_counts.is_empty());
    assert_eq!(
        mock_server.received_requests().await.unwrap().len(),
        requests_before
    );
}

#[tokio::test]
async fn unrelated_reads_reuse_the_derived_view() {
    let mock_server = MockServer::start().await;
    mount_submit_ok(&mock_server).await;
    mount_fetch_ok(
        &mock_server,
        serde_json::json!([
            { "source_text": "t1", "identified_control": "c1", "nis2_domain": "Risk", "confidence": 0.9 }
        ]),
    )
    .await;

    let mut s = session(&mock_server);
    s.stage_file(policy_pdf());
    s.analyze().await;

    s.view();
    let _busy = s.controller().is_busy();
    s.set_threshold(ConfidenceThreshold::default());
    s.view();
    assert_eq!(s.view_recomputations(), 1);
}

#[tokio::test]
async fn unreachable_backend_reports_transport_text() {
    let config = ComplianceApiConfig::local_mock(1).unwrap();
    let mut s = AnalysisSession::new(
        ComplianceClient::new(config).unwrap(),
        ConfidenceThreshold::default(),
    );
    s.stage_file(policy_pdf());

    assert_eq!(s.analyze().await, Some(SubmissionPhase::Failed));
    let message = s.controller().error().unwrap();
    assert_ne!(message, "Analyze request failed");
    assert!(!message.is_empty());
}
