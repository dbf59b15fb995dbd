//! # Wizard CLI — Fill in the questionnaire interactively.
//!
//! A line-based front-end over one [`FormSession`]. The active section is
//! printed with its numbered fields; a line is either an edit or a command.
//!
//! ## Input
//!
//! ```text
//! 2 Financial services       set field 2 of the active section
//! 3 2                        choice fields accept an option number
//! 1 +Critical / 1 -Low       select / deselect (bare value toggles)
//! 2 Alice\nBob               \n starts a new line in multi-line answers
//! 1 yes | 1 no | 1 unset     yes/no questions
//! :next :back :jump N :submit :show :reset :help :quit
//! ```
//!
//! End of input behaves like `:quit`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rforge_client::ForgeClient;
use rforge_core::{
    AnswerSet, DocumentFormat, Field, FieldEdit, FieldKind, Section, TemplateOptions, TriState,
};
use rforge_state::{DocumentGenerator, FormSession, SessionError};

use crate::download;

/// Lines of a text document shown at Preview.
const PREVIEW_LINES: usize = 20;

const HELP: &str = "\
Edit a field:   <number> <value>     e.g. `1 Acme Corp`
  choices:      <number> <option number or value>
  selections:   <number> +<value> | -<value> | <value> (toggle)
  yes/no:       <number> yes | no | unset
  multi-line:   use \\n for a line break
Commands:
  :next         validate this section and continue
  :back         previous section
  :jump N       return to an earlier section
  :submit       validate everything and generate the plan
  :show         print every answer
  :reset        start over (after a plan was generated)
  :quit         leave the wizard";

/// Arguments for `rforge wizard`.
#[derive(Args, Debug)]
pub struct WizardArgs {
    /// Directory the generated document is saved into.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Use the built-in option catalog instead of asking the backend.
    #[arg(long)]
    pub offline: bool,
}

/// Execute the wizard subcommand on stdin/stdout.
pub async fn run_wizard(args: &WizardArgs, client: &ForgeClient) -> Result<u8> {
    let options = if args.offline {
        TemplateOptions::default()
    } else {
        client.options().fetch_or_default().await
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut wizard = Wizard::new(stdin.lock(), stdout.lock(), options, args.output_dir.clone());
    let mut session = FormSession::new();
    wizard.run(&mut session, client.generator()).await?;
    Ok(0)
}

// ─── Commands ────────────────────────────────────────────────────────

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    /// 1-based section number.
    Jump(usize),
    Submit,
    Show,
    Reset,
    Help,
    Quit,
    /// 1-based field number within the active section.
    Edit { slot: usize, value: String },
}

/// Parse a non-empty input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix(':') {
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        return match (name, arg) {
            ("next" | "n", None) => Ok(Command::Next),
            ("back" | "b", None) => Ok(Command::Back),
            ("jump" | "j", Some(n)) => n
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .map(Command::Jump)
                .ok_or_else(|| format!("not a section number: {n}")),
            ("submit" | "s", None) => Ok(Command::Submit),
            ("show", None) => Ok(Command::Show),
            ("reset", None) => Ok(Command::Reset),
            ("help" | "h" | "?", None) => Ok(Command::Help),
            ("quit" | "q", None) => Ok(Command::Quit),
            _ => Err(format!("unknown command: {line} (try :help)")),
        };
    }

    let (slot, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let slot = slot
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| "expected `<field number> <value>` or a :command (try :help)".to_string())?;
    Ok(Command::Edit {
        slot,
        value: value.trim().to_string(),
    })
}

/// The offered choices for a choice field, empty for other fields.
pub fn choices_for(field: Field, options: &TemplateOptions) -> Vec<String> {
    match field {
        Field::InfrastructureEnvironment => options.infrastructure_options.clone(),
        Field::SeverityLevels => options.severity_levels.clone(),
        Field::CommunicationChannels => options.communication_channels.clone(),
        Field::OutputFormat => options
            .output_formats
            .iter()
            .map(|f| f.value.clone())
            .collect(),
        _ => Vec::new(),
    }
}

/// An option number (1-based) picks from `choices`; anything else is literal.
fn resolve_choice(value: &str, choices: &[String]) -> String {
    value
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| choices.get(i))
        .cloned()
        .unwrap_or_else(|| value.to_string())
}

fn parse_tri_state(value: &str) -> Option<TriState> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Some(TriState::Yes),
        "no" | "n" | "false" => Some(TriState::No),
        "unset" | "-" => Some(TriState::Unset),
        _ => None,
    }
}

/// Translate a raw value typed for `field` into an edit.
pub fn edit_for(
    field: Field,
    value: &str,
    answers: &AnswerSet,
    choices: &[String],
) -> Result<FieldEdit, String> {
    match field.kind() {
        FieldKind::Text | FieldKind::MultilineText => {
            Ok(FieldEdit::text(field, value.replace("\\n", "\n")))
        }
        FieldKind::SingleChoice => Ok(FieldEdit::choice(field, resolve_choice(value, choices))),
        FieldKind::MultiChoice => {
            let (raw, checked) = if let Some(raw) = value.strip_prefix('+') {
                (raw.trim(), Some(true))
            } else if let Some(raw) = value.strip_prefix('-') {
                (raw.trim(), Some(false))
            } else {
                (value, None)
            };
            if raw.is_empty() {
                return Err("name an option to select or deselect".to_string());
            }
            let choice = resolve_choice(raw, choices);
            let checked = checked.unwrap_or_else(|| {
                !answers
                    .choices(field)
                    .is_some_and(|selected| selected.contains(&choice))
            });
            Ok(FieldEdit::toggle(field, choice, checked))
        }
        FieldKind::TriState => parse_tri_state(value)
            .map(|answer| FieldEdit::tri_state(field, answer))
            .ok_or_else(|| "answer yes, no or unset".to_string()),
    }
}

fn one_line(value: &str) -> String {
    value.lines().collect::<Vec<_>>().join(" / ")
}

// ─── Wizard ──────────────────────────────────────────────────────────

/// Line-based questionnaire front-end.
pub struct Wizard<R, W> {
    input: R,
    output: W,
    options: TemplateOptions,
    output_dir: PathBuf,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(input: R, output: W, options: TemplateOptions, output_dir: PathBuf) -> Self {
        Self {
            input,
            output,
            options,
            output_dir,
        }
    }

    /// Read and apply lines until `:quit` or end of input.
    pub async fn run<G: DocumentGenerator>(
        &mut self,
        session: &mut FormSession,
        generator: &G,
    ) -> Result<()> {
        writeln!(
            self.output,
            "ResponseForge incident response questionnaire. Type :help for commands."
        )?;
        self.render(session)?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(msg) => {
                    writeln!(self.output, "{msg}")?;
                    continue;
                }
            };
            tracing::trace!(session_id = %session.id(), ?command, "wizard command");

            match command {
                Command::Quit => break,
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Show => self.show(session)?,
                Command::Next => self.next(session)?,
                Command::Back => {
                    session.previous();
                    self.render(session)?;
                }
                Command::Jump(n) => {
                    if n - 1 > session.section().index() {
                        writeln!(self.output, "Section {n} has not been reached yet.")?;
                    } else {
                        session.jump_to_index(n - 1);
                        self.render(session)?;
                    }
                }
                Command::Submit => self.submit(session, generator).await?,
                Command::Reset => match session.reset() {
                    Ok(()) => self.render(session)?,
                    Err(e) => writeln!(self.output, "{e}")?,
                },
                Command::Edit { slot, value } => self.edit(session, slot, &value)?,
            }
        }

        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    fn next(&mut self, session: &mut FormSession) -> Result<()> {
        let before = session.section();
        match session.next() {
            Ok(after) if after == before && after == Section::LAST_INPUT => {
                writeln!(
                    self.output,
                    "All sections are filled in. Type :submit to generate the plan."
                )?;
            }
            Ok(_) | Err(SessionError::Incomplete { .. }) => self.render(session)?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }

    fn edit(&mut self, session: &mut FormSession, slot: usize, value: &str) -> Result<()> {
        let Some(field) = session.section().fields().get(slot - 1).copied() else {
            writeln!(self.output, "There is no field {slot} in this section.")?;
            return Ok(());
        };

        let choices = choices_for(field, &self.options);
        let edit = match edit_for(field, value, session.answers(), &choices) {
            Ok(edit) => edit,
            Err(msg) => {
                writeln!(self.output, "{msg}")?;
                return Ok(());
            }
        };
        if let Err(e) = session.edit(edit) {
            writeln!(self.output, "{e}")?;
            return Ok(());
        }

        let shown = one_line(&session.answers().display_value(field));
        writeln!(self.output, "  {} = {shown}", field.key())?;
        if field.kind() == FieldKind::SingleChoice && !shown.is_empty() && !choices.contains(&shown)
        {
            writeln!(self.output, "  (not one of the offered options)")?;
        }
        Ok(())
    }

    async fn submit<G: DocumentGenerator>(
        &mut self,
        session: &mut FormSession,
        generator: &G,
    ) -> Result<()> {
        writeln!(self.output, "Generating...")?;
        self.output.flush()?;

        let result = session.submit(generator).await.cloned();
        match result {
            Ok(doc) => {
                match download::save(&doc, &self.output_dir) {
                    Ok(path) => writeln!(self.output, "Saved {}", path.display())?,
                    Err(e) => writeln!(self.output, "Could not save the document: {e}")?,
                }
                self.render(session)?;
            }
            Err(
                SessionError::SubmissionBlocked { .. }
                | SessionError::GenerationRejected(_)
                | SessionError::GeneratorUnreachable(_),
            ) => {
                writeln!(self.output, "Submission failed:")?;
                for error in session.errors() {
                    writeln!(self.output, "  ! {error}")?;
                }
            }
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }

    fn show(&mut self, session: &FormSession) -> Result<()> {
        for section in Section::INPUT {
            writeln!(self.output, "{}. {section}", section.index() + 1)?;
            for field in section.fields() {
                let value = one_line(&session.answers().display_value(*field));
                writeln!(self.output, "     {}: {value}", field.key())?;
            }
        }
        Ok(())
    }

    fn render(&mut self, session: &FormSession) -> Result<()> {
        let section = session.section();

        if section.is_terminal() {
            writeln!(self.output, "\n== {section} ==")?;
            if let Some(doc) = session.document() {
                writeln!(self.output, "Document: {} ({})", doc.filename, doc.format)?;
                if doc.format == DocumentFormat::Text {
                    for line in doc.content.lines().take(PREVIEW_LINES) {
                        writeln!(self.output, "  | {line}")?;
                    }
                }
            }
            writeln!(self.output, "Type :reset to start over or :quit to leave.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "\n== Section {}/{}: {section} ==",
            section.index() + 1,
            Section::INPUT.len()
        )?;
        for (i, field) in section.fields().iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, field.prompt())?;
            let choices = choices_for(*field, &self.options);
            if !choices.is_empty() {
                let numbered: Vec<String> = choices
                    .iter()
                    .enumerate()
                    .map(|(n, c)| format!("{}) {c}", n + 1))
                    .collect();
                writeln!(self.output, "       options: {}", numbered.join("  "))?;
            }
            let value = one_line(&session.answers().display_value(*field));
            let value = if value.is_empty() { "(empty)" } else { &value };
            writeln!(self.output, "       current: {value}")?;
        }

        if !session.errors().is_empty() {
            writeln!(self.output, "Please fix:")?;
            for error in session.errors() {
                writeln!(self.output, "  ! {error}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert_eq!(parse_command(":next"), Ok(Command::Next));
        assert_eq!(parse_command("  :b "), Ok(Command::Back));
        assert_eq!(parse_command(":jump 3"), Ok(Command::Jump(3)));
        assert_eq!(parse_command(":quit"), Ok(Command::Quit));
        assert!(parse_command(":jump 0").is_err());
        assert!(parse_command(":jump").is_err());
        assert!(parse_command(":launch").is_err());
    }

    #[test]
    fn edits_parse_with_free_text_values() {
        assert_eq!(
            parse_command("2 Financial  services "),
            Ok(Command::Edit {
                slot: 2,
                value: "Financial  services".into()
            })
        );
        assert_eq!(
            parse_command("1"),
            Ok(Command::Edit {
                slot: 1,
                value: String::new()
            })
        );
        assert!(parse_command("Acme").is_err());
        assert!(parse_command("0 x").is_err());
    }

    #[test]
    fn option_numbers_resolve_for_choice_fields() {
        let options = TemplateOptions::default();
        let choices = choices_for(Field::InfrastructureEnvironment, &options);
        let edit = edit_for(
            Field::InfrastructureEnvironment,
            "3",
            &AnswerSet::new(),
            &choices,
        )
        .unwrap();
        assert_eq!(edit, FieldEdit::choice(Field::InfrastructureEnvironment, "GCP"));

        let edit = edit_for(
            Field::InfrastructureEnvironment,
            "9",
            &AnswerSet::new(),
            &choices,
        )
        .unwrap();
        assert_eq!(edit, FieldEdit::choice(Field::InfrastructureEnvironment, "9"));
    }

    #[test]
    fn bare_selection_toggles() {
        let options = TemplateOptions::default();
        let choices = choices_for(Field::SeverityLevels, &options);
        let mut answers = AnswerSet::new();

        let edit = edit_for(Field::SeverityLevels, "High", &answers, &choices).unwrap();
        assert_eq!(edit, FieldEdit::toggle(Field::SeverityLevels, "High", true));
        answers.apply(edit).unwrap();

        let edit = edit_for(Field::SeverityLevels, "3", &answers, &choices).unwrap();
        assert_eq!(edit, FieldEdit::toggle(Field::SeverityLevels, "High", false));

        let edit = edit_for(Field::SeverityLevels, "-Low", &answers, &choices).unwrap();
        assert_eq!(edit, FieldEdit::toggle(Field::SeverityLevels, "Low", false));
        assert!(edit_for(Field::SeverityLevels, "+", &answers, &choices).is_err());
    }

    #[test]
    fn yes_no_answers() {
        let answers = AnswerSet::new();
        let field = Field::ConductPostIncidentReviews;
        assert_eq!(
            edit_for(field, "Y", &answers, &[]).unwrap(),
            FieldEdit::tri_state(field, TriState::Yes)
        );
        assert_eq!(
            edit_for(field, "unset", &answers, &[]).unwrap(),
            FieldEdit::tri_state(field, TriState::Unset)
        );
        assert!(edit_for(field, "maybe", &answers, &[]).is_err());
    }

    #[test]
    fn multiline_escape_becomes_newline() {
        let edit = edit_for(Field::SocAnalysts, r"Alice\nBob", &AnswerSet::new(), &[]).unwrap();
        assert_eq!(edit, FieldEdit::text(Field::SocAnalysts, "Alice\nBob"));
        assert_eq!(one_line("Alice\nBob"), "Alice / Bob");
    }
}
