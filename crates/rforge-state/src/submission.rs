//! # Submission
//!
//! Turns a complete answer set into a generated document.
//!
//! ## Pipeline
//!
//! 1. Validate every input section; on any error, set the combined error
//!    list and stop without contacting the generator.
//! 2. Mark the session in flight and snapshot the answers into a
//!    [`SubmissionTicket`].
//! 3. Await the [`DocumentGenerator`] with the snapshot.
//! 4. Apply the [`GenerationOutcome`]: store the document and move to
//!    Preview, or surface the generator's errors and stay put.
//!
//! [`FormSession::submit`] runs all four steps. Front-ends that cannot hold
//! `&mut FormSession` across the await use [`FormSession::begin_submission`]
//! and [`FormSession::complete_submission`] directly.
//!
//! The in-flight flag is owned by the ticket: it is raised when the ticket
//! is issued and lowered when the ticket is dropped, whether the ticket was
//! completed, discarded after an error, or lost with a cancelled future.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rforge_core::{AnswerSet, GeneratedDocument, Section, SessionId};

use crate::session::{FormSession, SessionError, TransitionKind};
use crate::validator;

/// Error shown when the generator fails without saying why.
pub const GENERIC_GENERATION_FAILURE: &str = "Failed to generate document";

// ─── Generator seam ──────────────────────────────────────────────────

/// The three distinguishable results of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The document was rendered.
    Generated(GeneratedDocument),
    /// The generator answered with application-level errors.
    Rejected(Vec<String>),
    /// No answer was obtained (connection failure or timeout).
    Unreachable(String),
}

/// Something that renders an answer set into a document.
///
/// Implementations own their transport and its time limit; a call that
/// exceeds the limit resolves to [`GenerationOutcome::Unreachable`].
pub trait DocumentGenerator {
    fn generate(&self, answers: &AnswerSet) -> impl Future<Output = GenerationOutcome> + Send;
}

// ─── Ticket ──────────────────────────────────────────────────────────

/// Proof that a submission passed validation and is in flight.
///
/// Holds the answer snapshot sent to the generator. Not `Clone`: one
/// ticket, one completion.
#[derive(Debug)]
pub struct SubmissionTicket {
    session: SessionId,
    answers: AnswerSet,
    in_flight: Arc<AtomicBool>,
}

impl SubmissionTicket {
    /// The answers to send to the generator.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn session(&self) -> SessionId {
        self.session
    }
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

// ─── Session operations ──────────────────────────────────────────────

impl FormSession {
    /// Validate all input sections and, if clean, issue a ticket.
    ///
    /// Fails with [`SessionError::SubmissionBlocked`] (and sets the combined
    /// error list) if any section is incomplete, with
    /// [`SessionError::AlreadyGenerated`] at Preview, and with
    /// [`SessionError::SubmissionInFlight`] while another ticket is live.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SessionError> {
        if self.section.is_terminal() {
            return Err(SessionError::AlreadyGenerated);
        }
        if self.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }

        let errors = validator::validate_all(&self.answers);
        if !errors.is_empty() {
            tracing::info!(
                session_id = %self.id,
                errors = errors.len(),
                "submission blocked by validation"
            );
            self.errors.clone_from(&errors);
            return Err(SessionError::SubmissionBlocked { errors });
        }

        self.errors.clear();
        self.in_flight.store(true, Ordering::Release);
        tracing::info!(session_id = %self.id, section = %self.section, "submission started");
        Ok(SubmissionTicket {
            session: self.id,
            answers: self.answers.clone(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Apply the generator's outcome for `ticket`, consuming it.
    ///
    /// On success the document is stored, the error list cleared and the
    /// session moved to Preview. On failure the section is unchanged and
    /// the error list holds the generator's messages, or
    /// [`GENERIC_GENERATION_FAILURE`] if it gave none.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: GenerationOutcome,
    ) -> Result<&GeneratedDocument, SessionError> {
        if ticket.session != self.id {
            return Err(SessionError::ForeignTicket {
                ticket: ticket.session,
                session: self.id,
            });
        }
        drop(ticket);

        match outcome {
            GenerationOutcome::Generated(document) => {
                tracing::info!(
                    session_id = %self.id,
                    filename = %document.filename,
                    format = %document.format,
                    "document generated"
                );
                self.errors.clear();
                self.transition(Section::Preview, TransitionKind::Submit);
                Ok(self.document.insert(document))
            }
            GenerationOutcome::Rejected(errors) => {
                let errors = if errors.is_empty() {
                    vec![GENERIC_GENERATION_FAILURE.to_string()]
                } else {
                    errors
                };
                tracing::warn!(
                    session_id = %self.id,
                    errors = errors.len(),
                    "document generation rejected"
                );
                self.errors.clone_from(&errors);
                Err(SessionError::GenerationRejected(errors))
            }
            GenerationOutcome::Unreachable(reason) => {
                tracing::warn!(session_id = %self.id, reason = %reason, "generator unreachable");
                self.errors = vec![reason.clone()];
                Err(SessionError::GeneratorUnreachable(reason))
            }
        }
    }

    /// Validate, generate, and apply the outcome in one call.
    ///
    /// The generator is called at most once, and only when every input
    /// section is valid.
    pub async fn submit<G>(&mut self, generator: &G) -> Result<&GeneratedDocument, SessionError>
    where
        G: DocumentGenerator,
    {
        let ticket = self.begin_submission()?;
        let outcome = generator.generate(ticket.answers()).await;
        self.complete_submission(ticket, outcome)
    }
}
