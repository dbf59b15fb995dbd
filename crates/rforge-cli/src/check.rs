//! # Check CLI — Validate an answers file without submitting it.
//!
//! Runs the section validator over every input section and reports the
//! errors per section, followed by advisory warnings for chosen values the
//! option catalogs do not list.
//!
//! ## Usage
//!
//! ```bash
//! rforge check answers.yaml
//! rforge check answers.json --offline
//! ```
//!
//! Exit code 0 when every section is complete, 1 otherwise. Warnings never
//! affect the exit code.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rforge_client::ForgeClient;
use rforge_core::{AnswerSet, Section, TemplateOptions};
use rforge_state::validate;

use crate::input::load_answers;

/// Arguments for `rforge check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Answers file (`.yaml`, `.yml` or `.json`).
    pub answers: PathBuf,

    /// Compare choices against the built-in catalog instead of asking the backend.
    #[arg(long)]
    pub offline: bool,
}

/// Validation errors of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub section: Section,
    pub errors: Vec<String>,
}

/// Result of checking one answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub sections: Vec<SectionReport>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn build(answers: &AnswerSet, options: &TemplateOptions) -> Self {
        Self {
            sections: Section::INPUT
                .iter()
                .map(|section| SectionReport {
                    section: *section,
                    errors: validate(*section, answers),
                })
                .collect(),
            warnings: options.unknown_choices(answers),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.sections.iter().all(|s| s.errors.is_empty())
    }

    pub fn error_count(&self) -> usize {
        self.sections.iter().map(|s| s.errors.len()).sum()
    }

    /// Human-readable rendering, one line per section plus its errors.
    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        for report in &self.sections {
            let n = report.section.index() + 1;
            if report.errors.is_empty() {
                writeln!(out, "  OK    {n}. {}", report.section)?;
            } else {
                writeln!(out, "  FAIL  {n}. {}", report.section)?;
                for error in &report.errors {
                    writeln!(out, "          - {error}")?;
                }
            }
        }
        for warning in &self.warnings {
            writeln!(out, "  WARN  {warning}")?;
        }
        if self.is_complete() {
            writeln!(out, "\nAll sections complete.")?;
        } else {
            writeln!(out, "\n{} error(s) found.", self.error_count())?;
        }
        Ok(())
    }
}

/// Execute the check subcommand.
pub async fn run_check(args: &CheckArgs, client: &ForgeClient) -> Result<u8> {
    let answers = load_answers(&args.answers)?;
    let options = if args.offline {
        TemplateOptions::default()
    } else {
        client.options().fetch_or_default().await
    };

    let report = CheckReport::build(&answers, &options);
    println!("Checking {}", args.answers.display());
    report.write_to(&mut std::io::stdout().lock())?;
    Ok(if report.is_complete() { 0 } else { 1 })
}
