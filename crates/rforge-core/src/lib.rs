//! # rforge-core — Foundational Types for ResponseForge
//!
//! ResponseForge collects an organization's incident-response program data
//! through a fixed sequence of questionnaire sections and submits it to a
//! backend that renders a NIST SP 800-61 style plan. This crate holds the
//! data model every other crate in the workspace shares; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed answer set.** `AnswerSet` is a struct with one field per
//!    question, not a string-keyed map. The four semantic field kinds
//!    (text, single choice, multi choice, tri-state) are distinct types.
//!
//! 2. **Tri-state is not a bool.** `TriState::Unset` is distinct from
//!    `TriState::No` and blocks progression. It is absent on the wire.
//!
//! 3. **Single `Section` enum.** Seven variants, fixed order, exhaustive
//!    `match` everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rforge-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod answers;
pub mod document;
pub mod error;
pub mod identity;
pub mod options;
pub mod section;

// Re-export primary types for ergonomic imports.
pub use answers::{AnswerSet, Field, FieldEdit, FieldKind, MultiChoice, TriState};
pub use document::{DocumentFormat, GeneratedDocument};
pub use error::ForgeError;
pub use identity::SessionId;
pub use options::{OutputFormatOption, TemplateOptions};
pub use section::Section;
