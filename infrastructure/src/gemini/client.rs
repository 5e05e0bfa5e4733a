//! HTTP client for the Gemini REST API.
//!
//! One [`GeminiClient`] is built per process from the resolved credential and
//! shared (read-only) by every session.

use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::GenerateContentRequest;
use parley_domain::{Credential, Model};
use std::time::Duration;
use tracing::{debug, warn};

/// Public Gemini endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Transport options for [`GeminiClient`].
///
/// Timeouts default to `None`: the transport's own behavior applies.
#[derive(Debug, Clone)]
pub struct GeminiOptions {
    pub base_url: String,
    /// Limit on a whole request, including reading a streamed body.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for GeminiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl GeminiOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Authenticated Gemini REST client.
pub struct GeminiClient {
    http: reqwest::Client,
    credential: Credential,
    base_url: String,
}

impl GeminiClient {
    /// Build a client. No request is made here.
    pub fn new(credential: Credential, options: GeminiOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = options.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GeminiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            credential,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST …:generateContent` URL for `model`.
    pub fn generate_url(&self, model: &Model) -> String {
        format!(
            "{}/{API_VERSION}/models/{}:generateContent",
            self.base_url, model
        )
    }

    /// `POST …:streamGenerateContent?alt=sse` URL for `model`.
    pub fn stream_url(&self, model: &Model) -> String {
        format!(
            "{}/{API_VERSION}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        )
    }

    /// POST a request and return the response once its status is known to
    /// be successful. Non-2xx statuses are read and classified.
    pub async fn post(
        &self,
        url: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<reqwest::Response> {
        debug!("POST {} ({} contents)", url, request.contents.len());

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = GeminiError::from_status(status.as_u16(), &body);
        warn!("Gemini API returned {}: {}", status, err);
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GeminiClient {
        GeminiClient::new(
            Credential::new("test-key").unwrap(),
            GeminiOptions::default().with_base_url(base),
        )
        .unwrap()
    }

    #[test]
    fn urls_use_model_id_and_trim_trailing_slash() {
        let client = client("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.stream_url(&Model::Gemini25Flash),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse"
        );
        assert_eq!(
            client.generate_url(&Model::Custom("my-tuned".into())),
            "http://localhost:8080/v1beta/models/my-tuned:generateContent"
        );
    }

    #[test]
    fn default_options_target_public_endpoint() {
        let options = GeminiOptions::default();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert!(options.request_timeout.is_none());
        assert!(options.connect_timeout.is_none());
    }
}
