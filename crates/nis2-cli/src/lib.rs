//! # nis2-cli: Command-Line Front End for the NIS2 Compliance Mapper
//!
//! Provides the `nis2` binary.
//!
//! ## Subcommands
//!
//! - `nis2 analyze FILE`: submit a document, wait for the result, and print
//!   the findings at the chosen confidence threshold. With `--interactive`,
//!   keep reading thresholds from stdin and re-render.
//!
//! ```bash
//! nis2 analyze policy.pdf
//! nis2 analyze assets.json --threshold 0.7 --format json
//! nis2 --api-url http://analysis.internal:8000/api/v1 analyze schema.sql -i
//! ```

pub mod analyze;
pub mod explore;
pub mod render;

use anyhow::{Context, Result};

use nis2_client::ComplianceApiConfig;

/// Resolve backend configuration. A flag replaces its environment variable,
/// which is then neither read nor validated.
pub fn resolve_config(api_url: Option<&str>, timeout_secs: Option<u64>) -> Result<ComplianceApiConfig> {
    let timeout_secs = match timeout_secs {
        Some(secs) => secs,
        None => ComplianceApiConfig::timeout_secs_from_env().context("invalid backend configuration in environment")?,
    };
    match api_url {
        Some(url) => ComplianceApiConfig::new(url, timeout_secs).with_context(|| format!("invalid --api-url {url:?}")),
        None => {
            let base_url =
                ComplianceApiConfig::base_url_from_env().context("invalid backend configuration in environment")?;
            Ok(ComplianceApiConfig { base_url, timeout_secs })
        }
    }
}
