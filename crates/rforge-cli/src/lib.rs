//! # rforge-cli — CLI Tool for ResponseForge
//!
//! Provides the `rforge` command-line interface over the questionnaire
//! state machine and the backend client.
//!
//! ## Subcommands
//!
//! - `rforge options` — Print the option catalogs offered by the backend.
//! - `rforge check` — Validate an answers file section by section.
//! - `rforge generate` — Submit an answers file and save the rendered plan.
//! - `rforge wizard` — Fill in the questionnaire interactively.
//! - `rforge health` — Probe the backend.
//!
//! ```bash
//! rforge check answers.yaml
//! rforge generate answers.yaml --output-dir plans/
//! rforge --config forge.yaml wizard
//! ```

pub mod check;
pub mod download;
pub mod generate;
pub mod health;
pub mod input;
pub mod options;
pub mod wizard;

use std::path::Path;

use anyhow::{Context, Result};
use rforge_client::{ForgeApiConfig, ForgeClient};

/// Build the backend client from `--config` if given, else from the environment.
pub fn build_client(config_path: Option<&Path>) -> Result<ForgeClient> {
    let config = match config_path {
        Some(path) => ForgeApiConfig::from_yaml_file(path)
            .with_context(|| format!("loading client config {}", path.display()))?,
        None => ForgeApiConfig::from_env().context("reading client config from environment")?,
    };
    tracing::debug!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "backend client configured"
    );
    ForgeClient::new(config).context("building backend client")
}
