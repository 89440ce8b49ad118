//! Outbound services used to generate plans

pub mod link_checker;
pub mod llm_client;
pub mod plan_generator;
pub mod serpapi_client;
pub mod youtube_client;

pub use link_checker::{HttpLinkChecker, LinkChecker};
pub use llm_client::{CompletionClient, LlmError, OpenAiClient};
pub use plan_generator::{GenerateError, PlanGenerator};
pub use serpapi_client::{SerpApiClient, WebSearch};
pub use youtube_client::{VideoSearch, YouTubeClient};
