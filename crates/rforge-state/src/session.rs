//! # Form Session
//!
//! The single owned state object for one questionnaire run.
//!
//! ## States
//!
//! The active [`Section`] is the state. Forward movement is gated by the
//! section validator; backward movement and jumps to already-visited
//! sections are never gated. Preview is entered only by a successful
//! submission (see `submission.rs`) and left by [`FormSession::reset`],
//! [`FormSession::previous`], or [`FormSession::jump_to`].
//!
//! ## Invariants
//!
//! - A generated document is held if and only if the section is Preview.
//!   Leaving Preview discards the document; answers are kept.
//! - The error list is replaced, never appended to. Any accepted edit or
//!   successful navigation clears it.
//! - Every section change appends a [`TransitionRecord`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rforge_core::{AnswerSet, FieldEdit, ForgeError, GeneratedDocument, Section, SessionId};
use serde::{Deserialize, Serialize};

use crate::validator;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors returned by session operations.
///
/// Validation and generation failures are also left in the session's
/// error list, which is what a front-end displays.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The active section failed validation; `next()` did not move.
    #[error("{section} is incomplete ({} error(s))", .errors.len())]
    Incomplete {
        section: Section,
        errors: Vec<String>,
    },

    /// At least one input section failed validation; nothing was submitted.
    #[error("questionnaire is incomplete ({} error(s))", .errors.len())]
    SubmissionBlocked { errors: Vec<String> },

    /// An edit did not fit the field it targets.
    #[error(transparent)]
    Edit(#[from] ForgeError),

    /// The session already holds a generated document.
    #[error("document already generated; reset to start a new questionnaire")]
    AlreadyGenerated,

    /// A submission is already awaiting the generator.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// A submission ticket was completed against a different session.
    #[error("submission ticket belongs to session {ticket}, not {session}")]
    ForeignTicket {
        ticket: SessionId,
        session: SessionId,
    },

    /// The generator answered with application-level errors.
    #[error("document generation failed: {}", .0.join("; "))]
    GenerationRejected(Vec<String>),

    /// The generator could not be reached.
    #[error("document generator unreachable: {0}")]
    GeneratorUnreachable(String),

    /// Reset is offered only once a document has been generated.
    #[error("reset is only available from the preview stage (current: {section})")]
    ResetUnavailable { section: Section },
}

// ─── Transition records ──────────────────────────────────────────────

/// What caused a section change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Advance,
    Retreat,
    Jump,
    Submit,
    Reset,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::Jump => "jump",
            Self::Submit => "submit",
            Self::Reset => "reset",
        };
        f.write_str(s)
    }
}

/// One entry of a session's transition history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: Section,
    pub to: Section,
    pub kind: TransitionKind,
    pub at: DateTime<Utc>,
}

// ─── Session ─────────────────────────────────────────────────────────

/// State of one questionnaire run.
#[derive(Debug)]
pub struct FormSession {
    pub(crate) id: SessionId,
    pub(crate) answers: AnswerSet,
    pub(crate) section: Section,
    pub(crate) errors: Vec<String>,
    pub(crate) document: Option<GeneratedDocument>,
    /// Shared with the outstanding submission ticket, if any.
    pub(crate) in_flight: Arc<AtomicBool>,
    pub(crate) history: Vec<TransitionRecord>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// Start a session with default answers at the first section.
    pub fn new() -> Self {
        Self::with_answers(AnswerSet::new())
    }

    /// Start a session with pre-filled answers at the first section.
    pub fn with_answers(answers: AnswerSet) -> Self {
        let id = SessionId::new();
        tracing::debug!(session_id = %id, "session started");
        Self {
            id,
            answers,
            section: Section::Organization,
            errors: Vec::new(),
            document: None,
            in_flight: Arc::new(AtomicBool::new(false)),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// The current error list (empty when nothing needs attention).
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The generated document; present only at Preview.
    pub fn document(&self) -> Option<&GeneratedDocument> {
        self.document.as_ref()
    }

    /// Whether a submission is awaiting the generator.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Apply a field edit. An accepted edit clears the error list.
    ///
    /// Edits are refused at Preview, where the answers have already been
    /// rendered into the held document.
    pub fn edit(&mut self, edit: FieldEdit) -> Result<(), SessionError> {
        if self.section.is_terminal() {
            return Err(SessionError::AlreadyGenerated);
        }
        let field = edit.field();
        self.answers.apply(edit)?;
        if !self.errors.is_empty() {
            self.errors.clear();
        }
        tracing::trace!(session_id = %self.id, field = field.key(), "field edited");
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Validate the active section and advance if it is complete.
    ///
    /// On failure the error list is set and the section does not change.
    /// Output is the last section `next()` reaches; a valid Output stays
    /// put with a cleared error list. At Preview this does nothing.
    pub fn next(&mut self) -> Result<Section, SessionError> {
        let errors = validator::validate(self.section, &self.answers);
        if !errors.is_empty() {
            tracing::debug!(
                session_id = %self.id,
                section = %self.section,
                errors = errors.len(),
                "section incomplete"
            );
            self.errors.clone_from(&errors);
            return Err(SessionError::Incomplete {
                section: self.section,
                errors,
            });
        }

        self.errors.clear();
        if self.section < Section::LAST_INPUT {
            if let Some(to) = self.section.next() {
                self.transition(to, TransitionKind::Advance);
            }
        }
        Ok(self.section)
    }

    /// Step back one section, floored at the first. Never validates.
    pub fn previous(&mut self) -> Section {
        self.errors.clear();
        if let Some(to) = self.section.previous() {
            self.transition(to, TransitionKind::Retreat);
        }
        self.section
    }

    /// Jump to `target` if it is at or before the active section.
    ///
    /// Jumps forward are ignored and leave the session untouched. Returns
    /// the resulting section.
    pub fn jump_to(&mut self, target: Section) -> Section {
        if target > self.section {
            tracing::trace!(session_id = %self.id, target = %target, "forward jump ignored");
            return self.section;
        }
        self.errors.clear();
        if target != self.section {
            self.transition(target, TransitionKind::Jump);
        }
        self.section
    }

    /// Like [`jump_to`](Self::jump_to), addressing the section by index.
    /// Indices past the last section are ignored the same way.
    pub fn jump_to_index(&mut self, index: usize) -> Section {
        match Section::from_index(index) {
            Ok(target) => self.jump_to(target),
            Err(_) => self.section,
        }
    }

    // ── Reset ────────────────────────────────────────────────────────

    /// Discard everything and start over at the first section.
    ///
    /// Only available at Preview. The session id and history are kept.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if !self.section.is_terminal() {
            return Err(SessionError::ResetUnavailable {
                section: self.section,
            });
        }
        self.answers = AnswerSet::default();
        self.errors.clear();
        self.transition(Section::Organization, TransitionKind::Reset);
        Ok(())
    }

    /// Move to `to`, dropping the document when leaving Preview, and record it.
    pub(crate) fn transition(&mut self, to: Section, kind: TransitionKind) {
        let from = self.section;
        if from.is_terminal() && !to.is_terminal() {
            self.document = None;
        }
        self.history.push(TransitionRecord {
            from,
            to,
            kind,
            at: Utc::now(),
        });
        self.section = to;
        tracing::debug!(
            session_id = %self.id,
            from = %from,
            to = %to,
            kind = %kind,
            "section changed"
        );
    }
}
