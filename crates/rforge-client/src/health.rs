//! Backend liveness probe.

use serde::{Deserialize, Serialize};

use crate::error::ForgeApiError;

/// Body of `GET {base}health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Client for the health endpoint.
#[derive(Debug, Clone)]
pub struct HealthClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl HealthClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    pub async fn check(&self) -> Result<HealthStatus, ForgeApiError> {
        let url = format!("{}health", self.base_url);
        let health: HealthStatus = crate::get_json(&self.http, "GET /health", &url).await?;
        tracing::debug!(status = %health.status, service = %health.service, "health probe");
        Ok(health)
    }
}
