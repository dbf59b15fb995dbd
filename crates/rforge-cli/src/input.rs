//! Answers files.
//!
//! An answers file holds a partial or complete answer set using the same
//! camelCase keys as the wire format. `.json` files are read as JSON,
//! anything else as YAML. Absent keys keep their session-start defaults.

use std::path::Path;

use anyhow::{Context, Result};
use rforge_core::AnswerSet;

/// Read an answer set from `path`.
pub fn load_answers(path: &Path) -> Result<AnswerSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading answers file {}", path.display()))?;

    let answers = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    };
    tracing::debug!(path = %path.display(), "answers loaded");
    Ok(answers)
}
