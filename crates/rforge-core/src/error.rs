//! # Error Types
//!
//! Errors raised by the core data model. Validation failures are not errors
//! in this sense: they are plain message lists produced by the section
//! validator in `rforge-state`.

use thiserror::Error;

use crate::answers::FieldKind;

/// Top-level error type for the ResponseForge data model.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// An edit does not match the kind of field it targets.
    #[error("cannot apply {edit} edit to {field} ({kind} field)")]
    InvalidEdit {
        /// Wire key of the targeted field.
        field: &'static str,
        /// Kind of the targeted field.
        kind: FieldKind,
        /// Kind of edit that was attempted.
        edit: &'static str,
    },

    /// A field key did not name any questionnaire field.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A section index outside `0..=6`.
    #[error("section index {0} is out of range")]
    InvalidSection(usize),

    /// Binary document content could not be decoded.
    #[error("document decode error: {0}")]
    Decode(String),
}
