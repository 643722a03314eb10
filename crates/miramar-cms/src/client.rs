//! HTTP client for the CMS REST API.
//!
//! Wraps `reqwest` with bearer-token handling, the storefront's no-cache
//! policy, and typed failures. There is no retry: every failure is final for
//! that request and callers decide whether to try another endpoint.

use std::time::Duration;

use miramar_core::CmsConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::CmsError;

/// Client for the CMS REST API.
///
/// Use [`CmsClient::new`] with the loaded [`CmsConfig`], or
/// [`CmsClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct CmsClient {
    client: Client,
    base_url: Url,
    host: String,
    token: Option<String>,
}

impl CmsClient {
    /// Creates a client from the CMS section of the app config.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`CmsError::InvalidBaseUrl`] if `config.host` is
    /// not a valid URL.
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let host = config.host.trim_end_matches('/').to_string();
        let base_url = Url::parse(&format!("{host}/")).map_err(|e| CmsError::InvalidBaseUrl {
            url: config.host.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            host,
            token: config.bearer_token().map(str::to_owned),
        })
    }

    /// Creates a client with a custom base URL and optional token (for
    /// testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`CmsClient::new`].
    pub fn with_base_url(base_url: &str, token: Option<&str>) -> Result<Self, CmsError> {
        let mut config = CmsConfig::local(base_url);
        config.token = token.unwrap_or_default().to_string();
        Self::new(&config)
    }

    /// The CMS host without a trailing slash, used to qualify relative
    /// upload URLs.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Builds `{host}{path}?{query}` with percent-encoded query parameters.
    ///
    /// Any path prefix on the configured host is kept, so a CMS mounted at
    /// `https://example.com/cms` resolves `/api/faqs` to
    /// `https://example.com/cms/api/faqs`.
    pub(crate) fn build_url(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        url.set_path(&format!("{prefix}/{path}"));

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends an authenticated GET, asserts a 2xx status, and parses the body
    /// as JSON.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure.
    /// - [`CmsError::UnexpectedStatus`] on any non-2xx status.
    /// - [`CmsError::Deserialize`] if the body is not valid JSON.
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value, CmsError> {
        let url = self.build_url(path, query);
        tracing::debug!(endpoint = %url, "CMS request");

        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::CACHE_CONTROL, "no-cache");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CmsError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
