//! # Option Catalogs
//!
//! The enumerated choices offered for single- and multi-choice questions.
//! The backend serves these at session start; when it cannot, the built-in
//! [`TemplateOptions::default`] set is used instead so the session is never
//! blocked on the lookup.

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;

/// One selectable output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormatOption {
    /// Value stored in `outputFormat` (e.g. `"md"`).
    pub value: String,
    /// Human-readable label (e.g. `"Markdown (.md)"`).
    pub label: String,
}

impl OutputFormatOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The four option lists served by the options endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOptions {
    pub infrastructure_options: Vec<String>,
    pub severity_levels: Vec<String>,
    pub communication_channels: Vec<String>,
    pub output_formats: Vec<OutputFormatOption>,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            infrastructure_options: strings(&["AWS", "Azure", "GCP", "On-Premises"]),
            severity_levels: strings(&["Low", "Medium", "High", "Critical"]),
            communication_channels: strings(&[
                "Email",
                "Phone",
                "Slack",
                "Microsoft Teams",
                "Other",
            ]),
            output_formats: vec![
                OutputFormatOption::new("md", "Markdown (.md)"),
                OutputFormatOption::new("txt", "Text (.txt)"),
            ],
        }
    }
}

impl TemplateOptions {
    /// Whether `value` is one of the offered output formats.
    pub fn has_output_format(&self, value: &str) -> bool {
        self.output_formats.iter().any(|f| f.value == value)
    }

    /// Describe every chosen value that is not in the corresponding list.
    ///
    /// Advisory only: the section validator does not consult option lists,
    /// since the lists may come from the fallback set rather than the server.
    pub fn unknown_choices(&self, answers: &AnswerSet) -> Vec<String> {
        let mut out = Vec::new();

        let infra = answers.infrastructure_environment.as_str();
        if !infra.is_empty() && !self.infrastructure_options.iter().any(|o| o == infra) {
            out.push(format!("infrastructureEnvironment: unknown option \"{infra}\""));
        }
        for level in answers.severity_levels.iter() {
            if !self.severity_levels.iter().any(|o| o == level) {
                out.push(format!("severityLevels: unknown option \"{level}\""));
            }
        }
        for channel in answers.communication_channels.iter() {
            if !self.communication_channels.iter().any(|o| o == channel) {
                out.push(format!("communicationChannels: unknown option \"{channel}\""));
            }
        }
        let format = answers.output_format.as_str();
        if !format.is_empty() && !self.has_output_format(format) {
            out.push(format!("outputFormat: unknown option \"{format}\""));
        }

        out
    }
}
