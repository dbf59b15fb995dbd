//! Typed client for plan generation.
//!
//! Every response is folded into a [`GenerationOutcome`]:
//!
//! | Backend behaviour                                | Outcome                  |
//! |--------------------------------------------------|--------------------------|
//! | `{success: true, document, filename}`            | `Generated`              |
//! | `{success: false, errors: [..]}` (any status)    | `Rejected(errors)`       |
//! | `{success: false, error: ".."}` (429, 413, 500)  | `Rejected([error])`      |
//! | unparsable body                                  | `Rejected([fallback])`   |
//! | connection failure, timeout, truncated body      | `Unreachable(message)`   |
//!
//! Generation is not idempotent from the user's point of view, so nothing
//! here retries.

use reqwest::header::CONTENT_TYPE;
use rforge_core::{AnswerSet, DocumentFormat, GeneratedDocument};
use rforge_state::{DocumentGenerator, GenerationOutcome, GENERIC_GENERATION_FAILURE};
use serde::Deserialize;

/// Largest request body the backend accepts.
pub const MAX_PAYLOAD_BYTES: usize = 16 * 1024;

/// Message reported for payloads over [`MAX_PAYLOAD_BYTES`].
pub const PAYLOAD_TOO_LARGE: &str = "Request payload too large. Maximum size is 16KB.";

/// Message reported when no response could be obtained.
pub const CONNECT_FAILURE: &str =
    "Unable to connect to the server. Please ensure the backend is running.";

/// Stem used when a successful response omits the filename.
const DEFAULT_FILENAME_STEM: &str = "incident_response_plan";

// -- Wire types ---------------------------------------------------------------

/// Response body of the generation endpoint, success and failure alike.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    document: Option<String>,
    filename: Option<String>,
    is_binary_format: Option<bool>,
    #[serde(default)]
    errors: Vec<String>,
    error: Option<String>,
}

impl GenerateResponse {
    fn into_outcome(self, answers: &AnswerSet) -> GenerationOutcome {
        match (self.success, self.document) {
            (true, Some(content)) => {
                let filename = self
                    .filename
                    .filter(|f| !f.trim().is_empty())
                    .unwrap_or_else(|| {
                        format!("{DEFAULT_FILENAME_STEM}.{}", answers.output_format.trim())
                    });
                GenerationOutcome::Generated(GeneratedDocument {
                    content,
                    filename,
                    format: DocumentFormat::from_binary_flag(self.is_binary_format),
                })
            }
            (true, None) => {
                GenerationOutcome::Rejected(vec![GENERIC_GENERATION_FAILURE.to_string()])
            }
            (false, _) => {
                let mut errors = self.errors;
                if errors.is_empty() {
                    errors.extend(self.error);
                }
                GenerationOutcome::Rejected(errors)
            }
        }
    }
}

// -- Client -------------------------------------------------------------------

/// Client for `POST {base}api/generate-ir-template`.
#[derive(Debug, Clone)]
pub struct GeneratorClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl GeneratorClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Submit `answers` for rendering.
    ///
    /// Text answers are trimmed and length-capped before sending. Payloads
    /// over [`MAX_PAYLOAD_BYTES`] are rejected without a request.
    pub async fn generate(&self, answers: &AnswerSet) -> GenerationOutcome {
        let endpoint = "POST /api/generate-ir-template";
        let url = format!("{}api/generate-ir-template", self.base_url);

        let payload = answers.sanitized();
        let body = match serde_json::to_vec(&payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(endpoint, error = %e, "cannot serialize answer set");
                return GenerationOutcome::Rejected(vec![GENERIC_GENERATION_FAILURE.to_string()]);
            }
        };
        if body.len() > MAX_PAYLOAD_BYTES {
            tracing::warn!(endpoint, bytes = body.len(), "payload over size limit");
            return GenerationOutcome::Rejected(vec![PAYLOAD_TOO_LARGE.to_string()]);
        }

        let resp = match self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(
                    endpoint,
                    timeout = e.is_timeout(),
                    error = %e,
                    "generation request failed"
                );
                return GenerationOutcome::Unreachable(CONNECT_FAILURE.to_string());
            }
        };

        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(endpoint, %status, error = %e, "generation response truncated");
                return GenerationOutcome::Unreachable(CONNECT_FAILURE.to_string());
            }
        };

        match serde_json::from_str::<GenerateResponse>(&text) {
            Ok(parsed) => {
                let outcome = parsed.into_outcome(&payload);
                let generated = matches!(outcome, GenerationOutcome::Generated(_));
                tracing::debug!(endpoint, %status, generated, "generation response");
                outcome
            }
            Err(e) => {
                tracing::warn!(endpoint, %status, error = %e, "unparsable generation response");
                GenerationOutcome::Rejected(vec![GENERIC_GENERATION_FAILURE.to_string()])
            }
        }
    }
}

impl DocumentGenerator for GeneratorClient {
    async fn generate(&self, answers: &AnswerSet) -> GenerationOutcome {
        GeneratorClient::generate(self, answers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> GenerationOutcome {
        serde_json::from_value::<GenerateResponse>(json)
            .unwrap()
            .into_outcome(&AnswerSet::new())
    }

    #[test]
    fn success_body_becomes_text_document() {
        let outcome = parse(serde_json::json!({
            "success": true, "document": "PLAN BODY", "filename": "plan.txt"
        }));
        assert_eq!(
            outcome,
            GenerationOutcome::Generated(GeneratedDocument::text("PLAN BODY", "plan.txt"))
        );
    }

    #[test]
    fn binary_flag_marks_document_binary() {
        let outcome = parse(serde_json::json!({
            "success": true, "document": "JVBERi0xLjQ=", "filename": "plan.pdf",
            "isBinaryFormat": true
        }));
        let GenerationOutcome::Generated(doc) = outcome else {
            panic!("expected a document");
        };
        assert_eq!(doc.format, DocumentFormat::Binary);
    }

    #[test]
    fn missing_filename_falls_back_to_output_format() {
        let outcome = parse(serde_json::json!({"success": true, "document": "X"}));
        let GenerationOutcome::Generated(doc) = outcome else {
            panic!("expected a document");
        };
        assert_eq!(doc.filename, "incident_response_plan.md");
    }

    #[test]
    fn singular_error_key_is_accepted() {
        let outcome = parse(serde_json::json!({
            "success": false, "error": "Rate limit exceeded"
        }));
        assert_eq!(
            outcome,
            GenerationOutcome::Rejected(vec!["Rate limit exceeded".into()])
        );
    }

    #[test]
    fn success_without_document_is_a_failure() {
        let outcome = parse(serde_json::json!({"success": true}));
        assert_eq!(
            outcome,
            GenerationOutcome::Rejected(vec![GENERIC_GENERATION_FAILURE.into()])
        );
    }

    #[test]
    fn bare_failure_leaves_errors_empty() {
        assert_eq!(
            parse(serde_json::json!({"success": false})),
            GenerationOutcome::Rejected(Vec::new())
        );
    }
}
