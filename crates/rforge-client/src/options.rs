//! Typed client for the option catalogs.

use rforge_core::TemplateOptions;

use crate::error::ForgeApiError;

/// Client for `GET {base}api/template-options`.
#[derive(Debug, Clone)]
pub struct OptionsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl OptionsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the option catalogs with a single request.
    pub async fn fetch(&self) -> Result<TemplateOptions, ForgeApiError> {
        let url = format!("{}api/template-options", self.base_url);
        crate::get_json(&self.http, "GET /api/template-options", &url).await
    }

    /// Fetch the option catalogs, substituting the built-in set on the
    /// first failure. Waits at most one client timeout.
    pub async fn fetch_or_default(&self) -> TemplateOptions {
        match self.fetch().await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(
                    transport = e.is_transport(),
                    error = %e,
                    "option lookup failed, using built-in catalog"
                );
                TemplateOptions::default()
            }
        }
    }
}
