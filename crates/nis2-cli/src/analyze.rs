//! # Analyze Subcommand
//!
//! Stages one document, runs a single submit/fetch attempt against the
//! backend, and prints the findings at the requested confidence threshold.
//! With `--interactive` the threshold can then be adjusted from stdin
//! without touching the backend again.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use nis2_client::{ComplianceApiConfig, ComplianceClient};
use nis2_core::{ConfidenceThreshold, StagedFile};
use nis2_state::{AnalysisSession, SubmissionPhase};

use crate::explore::run_explore;
use crate::render::{render_report, OutputFormat, RenderOptions};

/// Arguments for the analyze subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Document to analyze (PDF, JSON, or SQL/DDL).
    pub file: PathBuf,

    /// Minimum confidence a finding needs to be shown, within [0, 1].
    #[arg(long, default_value_t = ConfidenceThreshold::DEFAULT)]
    pub threshold: ConfidenceThreshold,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Include the backend's reasoning for each finding.
    #[arg(long)]
    pub show_reasoning: bool,

    /// After the first report, keep reading thresholds from stdin.
    #[arg(short, long)]
    pub interactive: bool,
}

impl AnalyzeArgs {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            show_reasoning: self.show_reasoning,
        }
    }
}

/// Execute the analyze subcommand.
///
/// Returns exit code 0 when a result was obtained and 1 when the attempt
/// failed. Local problems (unreadable file, bad configuration) are errors.
pub fn run_analyze(args: &AnalyzeArgs, config: ComplianceApiConfig) -> Result<u8> {
    let file = stage_from_path(&args.file)?;
    if !file.source_type().is_supported() {
        tracing::warn!(
            file = file.file_name(),
            "file extension is not one of pdf, json, sql, ddl; the backend may reject it"
        );
    }
    tracing::info!(file = file.file_name(), bytes = file.len(), "staged document");

    let client = ComplianceClient::new(config).context("failed to build HTTP client")?;
    let mut session = AnalysisSession::new(client, args.threshold);
    session.stage_file(file);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let phase = runtime
        .block_on(session.analyze())
        .context("no document staged")?;

    if phase != SubmissionPhase::Succeeded {
        let message = session.controller().error().unwrap_or("analysis failed");
        eprintln!("FAIL: {message}");
        return Ok(1);
    }

    let Some(result) = session.result().cloned() else {
        bail!("analysis succeeded without a result");
    };
    tracing::info!(
        analysis_id = result.analysis_id.as_ref().map(|id| id.as_str()),
        model = %result.model_metadata.model_name,
        findings = result.findings.len(),
        "analysis complete"
    );

    let opts = args.render_options();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let view = session.view();
    render_report(&mut out, &result, session.threshold(), &view, &opts)?;
    out.flush()?;

    if args.interactive {
        let stdin = io::stdin();
        let stderr = io::stderr();
        run_explore(stdin.lock(), &mut out, &mut stderr.lock(), session.findings_mut(), &opts)?;
    }
    Ok(0)
}

/// Read a document from disk into a [`StagedFile`] named after its final
/// path component.
pub fn stage_from_path(path: &Path) -> Result<StagedFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file path: {}", path.display()))?;
    let contents = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(StagedFile::new(file_name, contents))
}
