//! # Report Rendering
//!
//! Prints an analysis result and its derived view, either as a plain-text
//! report (model, threshold, domain distribution, findings table) or as a
//! single JSON document for scripting.

use std::collections::BTreeMap;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use nis2_core::{AnalysisResult, ConfidenceThreshold, DerivedView, DomainSlice, Finding, ModelMetadata};

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// How to render a report.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Add the backend's reasoning as a trailing column.
    pub show_reasoning: bool,
}

/// Confidence as a percentage with one decimal, e.g. `0.8123` → `81.2%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Render one report in the requested format.
pub fn render_report<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    threshold: ConfidenceThreshold,
    view: &DerivedView,
    opts: &RenderOptions,
) -> io::Result<()> {
    match opts.format {
        OutputFormat::Table => render_table(out, result, threshold, view, opts.show_reasoning),
        OutputFormat::Json => render_json(out, result, threshold, view),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    model_metadata: &'a ModelMetadata,
    threshold: ConfidenceThreshold,
    filtered: &'a [Finding],
    domain_counts: &'a BTreeMap<String, usize>,
    chart_data: Vec<DomainSlice>,
}

fn render_json<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    threshold: ConfidenceThreshold,
    view: &DerivedView,
) -> io::Result<()> {
    let report = JsonReport {
        model_metadata: &result.model_metadata,
        threshold,
        filtered: &view.filtered,
        domain_counts: &view.domain_counts,
        chart_data: view.chart_data(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

fn render_table<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    threshold: ConfidenceThreshold,
    view: &DerivedView,
    show_reasoning: bool,
) -> io::Result<()> {
    writeln!(out, "Model: {}", result.model_metadata.model_name)?;
    writeln!(out, "Confidence Threshold: {threshold}")?;
    writeln!(out)?;

    writeln!(out, "Domain Distribution")?;
    let chart = view.chart_data();
    if chart.is_empty() {
        writeln!(out, "  (no findings at this threshold)")?;
    }
    let name_width = chart.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
    for slice in &chart {
        writeln!(out, "  {:<name_width$}  {}", slice.name, slice.value)?;
    }
    writeln!(out)?;

    writeln!(out, "Findings ({})", view.len())?;
    if view.is_empty() {
        return Ok(());
    }

    let mut header = vec!["Text", "Control", "Domain", "Confidence"];
    if show_reasoning {
        header.push("Reasoning");
    }
    let rows: Vec<Vec<String>> = view
        .filtered
        .iter()
        .map(|f| {
            let mut row = vec![
                f.source_text.clone(),
                f.identified_control.clone(),
                f.nis2_domain.clone(),
                format_confidence(f.confidence),
            ];
            if show_reasoning {
                row.push(f.reasoning.clone().unwrap_or_default());
            }
            row
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, header.iter().copied(), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, rule.iter().map(String::as_str), &widths)?;
    for row in &rows {
        write_row(out, row.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_row<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join(" | ").trim_end())
}
