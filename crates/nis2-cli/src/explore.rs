//! # Interactive Threshold Explorer
//!
//! A line-oriented loop over an already-fetched result. Each line either
//! sets the threshold, nudges it by whole steps, or quits; the report is
//! re-rendered after every change. The backend is never contacted here.

use std::io::{BufRead, Write};

use anyhow::Result;

use nis2_core::{ConfidenceThreshold, FindingsView};

use crate::render::{render_report, OutputFormat, RenderOptions};

const PROMPT: &str = "threshold> ";

const HELP: &str = "\
Commands:
  <number>    set the threshold, e.g. 0.75
  +  / -      raise or lower by one step (repeat for more: +++)
  help, ?     show this help
  q, quit     leave (EOF also works)";

/// One parsed line of explorer input.
#[derive(Debug, Clone, PartialEq)]
pub enum ExploreCommand {
    Set(ConfidenceThreshold),
    Nudge(i32),
    Help,
    Quit,
    Invalid(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<ExploreCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let command = match line {
        "q" | "quit" | "exit" => ExploreCommand::Quit,
        "help" | "?" => ExploreCommand::Help,
        _ if line.chars().all(|c| c == '+') => ExploreCommand::Nudge(step_count(line)),
        _ if line.chars().all(|c| c == '-') => ExploreCommand::Nudge(-step_count(line)),
        _ => match line.parse::<ConfidenceThreshold>() {
            Ok(threshold) => ExploreCommand::Set(threshold),
            Err(e) => ExploreCommand::Invalid(e.to_string()),
        },
    };
    Some(command)
}

fn step_count(run: &str) -> i32 {
    i32::try_from(run.len()).unwrap_or(i32::MAX)
}

/// Run the explorer until `quit` or end of input.
///
/// Reports go to `out`. The prompt, help text and rejection messages go to
/// `console`, so `out` carries nothing but reports (one JSON document per
/// change in JSON mode).
pub fn run_explore<R: BufRead, W: Write, C: Write>(
    input: R,
    out: &mut W,
    console: &mut C,
    findings: &mut FindingsView,
    opts: &RenderOptions,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(console, "{PROMPT}")?;
        console.flush()?;
        let Some(line) = lines.next() else {
            writeln!(console)?;
            break;
        };
        let Some(command) = parse_command(&line?) else {
            continue;
        };

        let next = match command {
            ExploreCommand::Quit => break,
            ExploreCommand::Help => {
                writeln!(console, "{HELP}")?;
                continue;
            }
            ExploreCommand::Invalid(reason) => {
                writeln!(console, "{reason}")?;
                continue;
            }
            ExploreCommand::Set(threshold) => threshold,
            ExploreCommand::Nudge(steps) => findings.threshold().nudge(steps),
        };

        tracing::debug!(from = %findings.threshold(), to = %next, "threshold changed");
        findings.set_threshold(next);
        let Some(result) = findings.result().cloned() else {
            writeln!(console, "no analysis result to show")?;
            continue;
        };
        let view = findings.view();
        if opts.format == OutputFormat::Table {
            writeln!(out)?;
        }
        render_report(out, &result, findings.threshold(), &view, opts)?;
        out.flush()?;
    }
    Ok(())
}
