//! Resource link validation
//!
//! YouTube links are judged by shape alone; everything else must answer
//! 200, first to a HEAD and then, failing that, to a GET.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

const HEAD_TIMEOUT: Duration = Duration::from_secs(3);
const GET_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = concat!("LPG/", env!("CARGO_PKG_VERSION"));

#[async_trait]
pub trait LinkChecker: Send + Sync {
    async fn is_valid(&self, url: &str) -> bool;
}

pub fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Verdict for YouTube URLs without touching the network.
///
/// Only concrete videos count; channel, search and playlist pages do not.
/// Returns `None` for non-YouTube URLs.
pub fn youtube_verdict(url: &str) -> Option<bool> {
    if !is_youtube(url) {
        return None;
    }
    Some(url.contains("watch?v=") || url.contains("youtu.be/"))
}

/// Link checker backed by real HTTP requests
pub struct HttpLinkChecker {
    http_client: reqwest::Client,
}

impl HttpLinkChecker {
    pub fn new() -> Result<Self, reqwest::Error> {
        // Default redirect policy follows up to 10 hops
        let http_client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl LinkChecker for HttpLinkChecker {
    async fn is_valid(&self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        if let Some(verdict) = youtube_verdict(url) {
            return verdict;
        }

        match self.http_client.head(url).timeout(HEAD_TIMEOUT).send().await {
            Ok(response) if response.status() == StatusCode::OK => return true,
            Ok(response) => {
                tracing::debug!(url = %url, status = %response.status(), "HEAD rejected, retrying with GET");
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "HEAD failed, retrying with GET");
            }
        }

        match self.http_client.get(url).timeout(GET_TIMEOUT).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Link check failed");
                false
            }
        }
    }
}
