//! # Generate CLI — Submit an answers file and save the plan.
//!
//! Loads the answers into a fresh session, advances through every input
//! section exactly as the interactive flow would, submits, and saves the
//! generated document.
//!
//! ```bash
//! rforge generate answers.yaml --output-dir plans/
//! ```
//!
//! Exit code 0 when a document was saved, 1 when a section is incomplete
//! or the backend refused or could not be reached.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rforge_client::ForgeClient;
use rforge_core::AnswerSet;
use rforge_state::{DocumentGenerator, FormSession, SessionError};

use crate::download;
use crate::input::load_answers;

/// Arguments for `rforge generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Answers file (`.yaml`, `.yml` or `.json`).
    pub answers: PathBuf,

    /// Directory the generated document is saved into.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Execute the generate subcommand against the configured backend.
pub async fn run_generate(args: &GenerateArgs, client: &ForgeClient) -> Result<u8> {
    let answers = load_answers(&args.answers)?;
    generate_document(
        answers,
        client.generator(),
        &args.output_dir,
        &mut std::io::stdout().lock(),
    )
    .await
}

/// Drive one session from `answers` to a saved document.
pub async fn generate_document<G, W>(
    answers: AnswerSet,
    generator: &G,
    output_dir: &Path,
    out: &mut W,
) -> Result<u8>
where
    G: DocumentGenerator,
    W: Write,
{
    let mut session = FormSession::with_answers(answers);
    tracing::info!(session_id = %session.id(), "generating from answers file");

    // Advance until `next()` stops moving, which happens at Output.
    loop {
        let before = session.section();
        match session.next() {
            Ok(after) if after == before => break,
            Ok(_) => {}
            Err(SessionError::Incomplete { section, errors }) => {
                writeln!(out, "Section {}. {section} is incomplete:", section.index() + 1)?;
                for error in errors {
                    writeln!(out, "  - {error}")?;
                }
                return Ok(1);
            }
            Err(e) => return Err(e.into()),
        }
    }

    match session.submit(generator).await {
        Ok(doc) => {
            let path = download::save(doc, output_dir)
                .with_context(|| format!("saving {}", doc.filename))?;
            writeln!(out, "Saved {} ({})", path.display(), doc.format)?;
            Ok(0)
        }
        Err(SessionError::GenerationRejected(errors)) => {
            writeln!(out, "The backend rejected the submission:")?;
            for error in errors {
                writeln!(out, "  - {error}")?;
            }
            Ok(1)
        }
        Err(SessionError::GeneratorUnreachable(reason)) => {
            writeln!(out, "{reason}")?;
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
