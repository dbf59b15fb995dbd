//! Backend client error types.
//!
//! Generation does not surface these: its failures are folded into
//! [`rforge_state::GenerationOutcome`] instead.

/// Why a catalog or health request produced no usable value.
#[derive(Debug, thiserror::Error)]
pub enum ForgeApiError {
    /// No response: connection refused, DNS failure, timeout.
    #[error("{endpoint}: no response from backend: {source}")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{endpoint}: backend answered {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// The body was not the expected JSON shape.
    #[error("{endpoint}: unexpected response body: {source}")]
    Body {
        endpoint: &'static str,
        source: reqwest::Error,
    },
}

impl ForgeApiError {
    /// Whether the backend could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
