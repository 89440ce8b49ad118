//! SerpAPI (Google engine) client used for fallback resource search
//!
//! Failures never abort plan generation: they are logged and the search
//! yields no resources.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lpg_common::plan::Resource;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::link_checker::{is_youtube, LinkChecker};

const SERPAPI_URL: &str = "https://serpapi.com/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const REQUESTS_PER_SECOND: u32 = 5;

/// Longest resource name kept from a search result title
pub const MAX_NAME_CHARS: usize = 70;

/// Title used when a result has none
const DEFAULT_NAME: &str = "Resource";

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Web search returning ready-to-attach resources
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Up to `num_results` resources with working links for `query`.
    /// `kind` is the resource type being looked for.
    async fn search(&self, query: &str, num_results: usize, kind: &str) -> Vec<Resource>;
}

#[derive(Debug, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
}

pub struct SerpApiClient {
    http_client: reqwest::Client,
    api_key: String,
    link_checker: Arc<dyn LinkChecker>,
    rate_limiter: DefaultDirectRateLimiter,
}

impl SerpApiClient {
    pub fn new(api_key: String, link_checker: Arc<dyn LinkChecker>) -> Result<Self, SerpApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SerpApiError::NetworkError(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http_client,
            api_key,
            link_checker,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    async fn fetch(&self, query: &str, num_results: usize) -> Result<SerpApiResponse, SerpApiError> {
        self.rate_limiter.until_ready().await;

        let num = num_results.to_string();
        let params = [
            ("engine", "google"),
            ("q", query),
            ("api_key", self.api_key.as_str()),
            ("num", num.as_str()),
        ];

        tracing::debug!(query = %query, num_results, "Querying SerpAPI");

        let response = self
            .http_client
            .get(SERPAPI_URL)
            .query(&params)
            .send()
            .await
            .map_err(|e| SerpApiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SerpApiError::ApiError(status.as_u16(), error_text));
        }

        let body: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| SerpApiError::ParseError(e.to_string()))?;

        if let Some(error) = &body.error {
            return Err(SerpApiError::ApiError(status.as_u16(), error.clone()));
        }
        Ok(body)
    }
}

#[async_trait]
impl WebSearch for SerpApiClient {
    async fn search(&self, query: &str, num_results: usize, kind: &str) -> Vec<Resource> {
        match self.fetch(query, num_results).await {
            Ok(body) => {
                let resources = collect_resources(
                    &body.organic_results,
                    num_results,
                    kind,
                    self.link_checker.as_ref(),
                )
                .await;
                tracing::info!(query = %query, found = resources.len(), "Fallback search complete");
                resources
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "SerpAPI error");
                Vec::new()
            }
        }
    }
}

/// Turn the first `num_results` organic results into resources, keeping only
/// working links. YouTube links are always typed `video`.
pub async fn collect_resources(
    results: &[OrganicResult],
    num_results: usize,
    kind: &str,
    checker: &dyn LinkChecker,
) -> Vec<Resource> {
    let mut resources = Vec::new();
    for item in results.iter().take(num_results) {
        let Some(link) = item.link.as_deref().filter(|l| !l.trim().is_empty()) else {
            continue;
        };
        if !checker.is_valid(link).await {
            continue;
        }
        let title = item.title.as_deref().unwrap_or(DEFAULT_NAME);
        let res_type = if is_youtube(link) { "video" } else { kind };
        resources.push(Resource::new(truncate_chars(title, MAX_NAME_CHARS), link, res_type));
    }
    resources
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts everything except links containing "broken"
    struct FakeChecker;

    #[async_trait]
    impl LinkChecker for FakeChecker {
        async fn is_valid(&self, url: &str) -> bool {
            !url.contains("broken")
        }
    }

    fn result(title: Option<&str>, link: Option<&str>) -> OrganicResult {
        OrganicResult {
            title: title.map(str::to_string),
            link: link.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_collect_resources_filters_and_types() {
        let long_title = "x".repeat(100);
        let results = vec![
            result(Some("Broken"), Some("https://broken.example")),
            result(Some("Talk"), Some("https://www.youtube.com/watch?v=1")),
            result(None, Some("https://pod.example/ep1")),
            result(Some(&long_title), Some("https://blog.example")),
            result(Some("No link"), None),
        ];

        let resources = collect_resources(&results, 4, "podcast", &FakeChecker).await;
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].kind, "video");
        assert_eq!(resources[1].name, "Resource");
        assert_eq!(resources[1].kind, "podcast");
        assert_eq!(resources[2].name.chars().count(), MAX_NAME_CHARS);
    }

    #[tokio::test]
    async fn test_collect_resources_respects_limit() {
        let results = vec![
            result(Some("A"), Some("https://a.example")),
            result(Some("B"), Some("https://b.example")),
        ];
        let resources = collect_resources(&results, 1, "article", &FakeChecker).await;
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "A");
    }

    #[test]
    fn test_parse_response() {
        let body: SerpApiResponse = serde_json::from_str(
            r#"{"search_metadata": {}, "organic_results": [{"position": 1, "title": "T", "link": "https://t.example"}]}"#,
        )
        .unwrap();
        assert_eq!(body.organic_results.len(), 1);
        assert!(body.error.is_none());

        let body: SerpApiResponse = serde_json::from_str(r#"{"error": "Invalid API key."}"#).unwrap();
        assert!(body.organic_results.is_empty());
        assert_eq!(body.error.as_deref(), Some("Invalid API key."));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 70), "short");
    }
}
