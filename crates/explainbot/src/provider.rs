use std::time::Duration;

use explainbot_core::chat::{extract_reply, ChatRequest, ChatResponse};

use crate::prelude::*;

/// Connection settings for the completion provider, resolved once at
/// startup and passed by reference into the analyzer and orchestrator.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Resolve provider settings from the global CLI arguments.
    ///
    /// A missing or empty API key is a configuration error, reported here
    /// before any request is attempted.
    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        let api_key = global
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration("OPENAI_API_KEY environment variable not set".to_string())
            })?;

        Ok(Self {
            api_key,
            base_url: global.api_base.trim_end_matches('/').to_string(),
            model: global.model.clone(),
            timeout: Duration::from_secs(global.timeout),
        })
    }
}

/// HTTP client for the chat completions endpoint.
pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    /// Build a client with bearer auth headers and the configured
    /// per-request timeout.
    pub fn new(config: ProviderConfig) -> Result<Self, Error> {
        use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&f!("Bearer {}", config.api_key))
                .map_err(|e| Error::Configuration(f!("Invalid API key header: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(f!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one system + user exchange and return the assistant's reply.
    ///
    /// Timeouts and connection failures surface as provider errors; HTTP
    /// 429 surfaces as a distinct rate-limit error carrying the provider's
    /// Retry-After guidance when present.
    pub async fn explain(&self, system: &str, user: &str) -> Result<String, Error> {
        let request = ChatRequest::new(&self.config.model, system, user);
        let url = f!("{}/chat/completions", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(f!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit {
                retry_after_secs: retry_after_secs(response.headers()),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(f!(
                "provider returned HTTP {status}: {}",
                body.trim()
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(f!("failed to parse provider response: {e}")))?;

        extract_reply(&completion).map_err(Error::Provider)
    }
}

/// Parse the Retry-After header as a whole number of seconds.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

    #[test]
    fn test_retry_after_parses_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("20"));
        assert_eq!(retry_after_secs(&headers), Some(20));
    }

    #[test]
    fn test_retry_after_absent() {
        assert_eq!(retry_after_secs(&HeaderMap::new()), None);
    }

    #[test]
    fn test_retry_after_ignores_http_dates() {
        // The HTTP-date form of Retry-After is not worth parsing here; it
        // falls back to the caller's default pause.
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after_secs(&headers), None);
    }
}
