//! # rforge-state — Questionnaire State Machine
//!
//! Implements the form-state and validation machine that gates a session's
//! progress through the questionnaire and triggers document generation.
//!
//! ## Components
//!
//! - **Validator** (`validator.rs`): pure `(section, answers) -> errors`,
//!   driven by declarative per-section rule tables evaluated in fixed order.
//!
//! - **Session** (`session.rs`): the single owned state object. Holds the
//!   answer set, active section, error list, and generated document;
//!   implements edits, `next`/`previous`/`jump_to`, and `reset`.
//!
//! - **Submission** (`submission.rs`): re-validates every input section,
//!   then hands a snapshot of the answers to a [`DocumentGenerator`] and
//!   applies its [`GenerationOutcome`].
//!
//! ## Transitions
//!
//! ```text
//!            next (valid)        next (valid)              submit (all valid, generated)
//! Organization ────▶ Team ────▶ ... ────▶ Output ═══════════════════════▶ Preview
//!      ▲                                    │                                │
//!      └──────────── previous / jump_to ────┘                                │
//!      ▲                                                                     │
//!      └───────────────────────────── reset ─────────────────────────────────┘
//! ```
//!
//! Section state is an enum with runtime-checked transitions, in the same
//! way as the lifecycle machines elsewhere in the workspace: the transition
//! set is small and linear, so a typestate encoding buys little.

pub mod session;
pub mod submission;
pub mod validator;

pub use session::{FormSession, SessionError, TransitionKind, TransitionRecord};
pub use submission::{
    DocumentGenerator, GenerationOutcome, SubmissionTicket, GENERIC_GENERATION_FAILURE,
};
pub use validator::{rules_for, validate, validate_all, Predicate, Rule};
