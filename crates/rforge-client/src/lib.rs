//! # rforge-client -- Typed Rust client for the ResponseForge backend
//!
//! Provides typed access to the three backend endpoints:
//! - **Options** via `GET {base}api/template-options`
//! - **Generation** via `POST {base}api/generate-ir-template`
//! - **Health** via `GET {base}health`
//!
//! ## Failure policy
//!
//! Nothing is retried. An options lookup is one request; through
//! [`OptionsClient::fetch_or_default`] its first failure substitutes the
//! built-in catalog, so a session waits at most one timeout. Generation
//! outcomes are folded into [`GenerationOutcome`] so the session state
//! machine can tell rejections from an unreachable backend.
//!
//! [`GenerationOutcome`]: rforge_state::GenerationOutcome

pub mod config;
pub mod error;
pub mod generate;
pub mod health;
pub mod options;

pub use config::{ConfigError, ForgeApiConfig};
pub use error::ForgeApiError;
pub use generate::GeneratorClient;
pub use health::{HealthClient, HealthStatus};
pub use options::OptionsClient;

use std::time::Duration;

/// Top-level backend client. Holds one sub-client per endpoint over a
/// shared connection pool.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    options: OptionsClient,
    generator: GeneratorClient,
    health: HealthClient,
}

impl ForgeClient {
    /// Create a client from configuration.
    ///
    /// The configured timeout bounds every request; a generation call that
    /// exceeds it resolves as unreachable.
    pub fn new(config: ForgeApiConfig) -> Result<Self, ForgeApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ForgeApiError::Transport {
                endpoint: "client_init",
                source,
            })?;

        Ok(Self {
            options: OptionsClient::new(http.clone(), config.base_url.clone()),
            generator: GeneratorClient::new(http.clone(), config.base_url.clone()),
            health: HealthClient::new(http, config.base_url),
        })
    }

    /// Access the option-catalog client.
    pub fn options(&self) -> &OptionsClient {
        &self.options
    }

    /// Access the document-generation client.
    pub fn generator(&self) -> &GeneratorClient {
        &self.generator
    }

    /// Access the health-probe client.
    pub fn health(&self) -> &HealthClient {
        &self.health
    }
}

/// One GET, decoded as JSON. Non-2xx statuses keep their body for the error.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    endpoint: &'static str,
    url: &str,
) -> Result<T, ForgeApiError> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|source| ForgeApiError::Transport { endpoint, source })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ForgeApiError::Status {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }

    resp.json()
        .await
        .map_err(|source| ForgeApiError::Body { endpoint, source })
}
