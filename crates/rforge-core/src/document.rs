//! # Generated Document
//!
//! The rendered plan returned by a successful submission. Content is opaque
//! to this crate: plain-text formats carry the document body directly, binary
//! formats (e.g. PDF) carry it base64-encoded in the same string field.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ForgeError;

/// How the `content` string of a [`GeneratedDocument`] is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// UTF-8 text (Markdown or plain text).
    #[default]
    Text,
    /// Base64-encoded binary (PDF).
    Binary,
}

impl DocumentFormat {
    /// Map the generator's `isBinaryFormat` flag (absent means text).
    pub fn from_binary_flag(is_binary: Option<bool>) -> Self {
        if is_binary.unwrap_or(false) {
            Self::Binary
        } else {
            Self::Text
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// A rendered document ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Document body, or base64 when `format` is `Binary`.
    pub content: String,
    /// Suggested filename, as supplied by the generator.
    pub filename: String,
    pub format: DocumentFormat,
}

impl GeneratedDocument {
    pub fn text(content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
            format: DocumentFormat::Text,
        }
    }

    pub fn binary(base64_content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content: base64_content.into(),
            filename: filename.into(),
            format: DocumentFormat::Binary,
        }
    }

    /// The bytes a download should contain.
    pub fn bytes(&self) -> Result<Vec<u8>, ForgeError> {
        match self.format {
            DocumentFormat::Text => Ok(self.content.as_bytes().to_vec()),
            DocumentFormat::Binary => STANDARD
                .decode(self.content.trim())
                .map_err(|e| ForgeError::Decode(e.to_string())),
        }
    }
}
