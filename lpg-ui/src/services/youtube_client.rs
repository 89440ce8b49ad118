//! YouTube Data API v3 client used to pick a best video per week
//!
//! Best = most viewed among the top search hits. When statistics cannot be
//! fetched the first hit is used.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use lpg_common::plan::BestVideo;
use serde::Deserialize;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const REQUESTS_PER_SECOND: u32 = 5;

/// Search hits considered per query
pub const CANDIDATES: usize = 5;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn best_video(&self, query: &str) -> Option<BestVideo>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    // The API encodes counts as strings
    view_count: Option<String>,
}

/// Search hit before statistics are known
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
    pub channel: String,
}

impl VideoCandidate {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

pub struct YouTubeClient {
    http_client: reqwest::Client,
    api_key: String,
    rate_limiter: DefaultDirectRateLimiter,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self, YouTubeError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| YouTubeError::NetworkError(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http_client,
            api_key,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YouTubeError> {
        self.rate_limiter.until_ready().await;

        let response = self
            .http_client
            .get(format!("{}/{}", YOUTUBE_API_URL, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| YouTubeError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(YouTubeError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| YouTubeError::ParseError(e.to_string()))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, YouTubeError> {
        let max_results = CANDIDATES.to_string();
        let body: SearchResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("maxResults", max_results.as_str()),
                    ("q", query),
                ],
            )
            .await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let snippet = item.snippet.unwrap_or(Snippet {
                    title: String::new(),
                    channel_title: String::new(),
                });
                Some(VideoCandidate {
                    video_id,
                    title: decode_entities(&snippet.title),
                    channel: decode_entities(&snippet.channel_title),
                })
            })
            .collect())
    }

    pub async fn view_counts(&self, ids: &[String]) -> Result<HashMap<String, u64>, YouTubeError> {
        let joined = ids.join(",");
        let body: VideosResponse = self
            .get_json("videos", &[("part", "statistics"), ("id", joined.as_str())])
            .await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let views = item.statistics?.view_count?.parse::<u64>().ok()?;
                Some((item.id, views))
            })
            .collect())
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn best_video(&self, query: &str) -> Option<BestVideo> {
        let candidates = match self.search(query).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "YouTube search failed");
                return None;
            }
        };
        if candidates.is_empty() {
            return None;
        }

        let ids: Vec<String> = candidates.iter().map(|c| c.video_id.clone()).collect();
        let views = match self.view_counts(&ids).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "YouTube statistics failed, using top hit");
                HashMap::new()
            }
        };

        pick_best(&candidates, &views)
    }
}

/// Highest view count wins; ties (and missing statistics) keep search order
pub fn pick_best(candidates: &[VideoCandidate], views: &HashMap<String, u64>) -> Option<BestVideo> {
    let mut best: Option<(&VideoCandidate, u64)> = None;
    for candidate in candidates {
        let count = views.get(&candidate.video_id).copied().unwrap_or(0);
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((candidate, count)),
        }
    }

    best.map(|(c, view_count)| BestVideo {
        title: c.title.clone(),
        link: c.watch_url(),
        channel: c.channel.clone(),
        view_count,
    })
}

/// Snippet text arrives HTML-escaped; pages escape it again on render
fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str) -> VideoCandidate {
        VideoCandidate {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            channel: "Channel".to_string(),
        }
    }

    #[test]
    fn test_pick_best_by_views() {
        let candidates = vec![candidate("a"), candidate("b"), candidate("c")];
        let views = HashMap::from([
            ("a".to_string(), 10),
            ("b".to_string(), 5_000),
            ("c".to_string(), 20),
        ]);
        let best = pick_best(&candidates, &views).unwrap();
        assert_eq!(best.title, "Video b");
        assert_eq!(best.link, "https://www.youtube.com/watch?v=b");
        assert_eq!(best.view_count, 5_000);
    }

    #[test]
    fn test_pick_best_without_statistics_keeps_first() {
        let candidates = vec![candidate("a"), candidate("b")];
        let best = pick_best(&candidates, &HashMap::new()).unwrap();
        assert_eq!(best.link, "https://www.youtube.com/watch?v=a");
        assert_eq!(best.view_count, 0);
    }

    #[test]
    fn test_pick_best_empty() {
        assert!(pick_best(&[], &HashMap::new()).is_none());
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("Rust &amp; WebAssembly: &quot;Hello&quot; &lt;3 it&#39;s"),
            "Rust & WebAssembly: \"Hello\" <3 it's"
        );
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_parse_search_and_statistics() {
        let search: SearchResponse = serde_json::from_str(
            r#"{"items": [
                {"id": {"kind": "youtube#video", "videoId": "abc"},
                 "snippet": {"title": "Rust in 100s", "channelTitle": "Fireship"}},
                {"id": {"kind": "youtube#channel", "channelId": "xyz"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(search.items.len(), 2);
        assert_eq!(search.items[0].id.video_id.as_deref(), Some("abc"));
        assert!(search.items[1].id.video_id.is_none());

        let videos: VideosResponse = serde_json::from_str(
            r#"{"items": [{"id": "abc", "statistics": {"viewCount": "12345", "likeCount": "9"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            videos.items[0].statistics.as_ref().unwrap().view_count.as_deref(),
            Some("12345")
        );
    }
}
