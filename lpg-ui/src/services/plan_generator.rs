//! Learning plan generation pipeline
//!
//! One completion call produces the plan. The reply is then cleaned up:
//! broken links are dropped, learning styles the model ignored are
//! backfilled from web search, and each week gets a best video.

use futures::future::join_all;
use lpg_common::plan::{build_prompt, parse_plan_reply, LearningPlan, PlanRequest, Resource, Week};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::link_checker::LinkChecker;
use super::llm_client::{CompletionClient, LlmError};
use super::serpapi_client::WebSearch;
use super::youtube_client::VideoSearch;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Results requested per backfill search
const BACKFILL_RESULTS: usize = 1;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Invalid(String),

    #[error("Completion failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Model reply could not be parsed as a learning plan")]
    Unparseable,

    #[error("Model returned a plan without weeks")]
    Empty,
}

pub struct PlanGenerator {
    llm: Arc<dyn CompletionClient>,
    link_checker: Arc<dyn LinkChecker>,
    web_search: Option<Arc<dyn WebSearch>>,
    video_search: Option<Arc<dyn VideoSearch>>,
}

impl PlanGenerator {
    pub fn new(llm: Arc<dyn CompletionClient>, link_checker: Arc<dyn LinkChecker>) -> Self {
        Self {
            llm,
            link_checker,
            web_search: None,
            video_search: None,
        }
    }

    pub fn with_web_search(mut self, web_search: Arc<dyn WebSearch>) -> Self {
        self.web_search = Some(web_search);
        self
    }

    pub fn with_video_search(mut self, video_search: Arc<dyn VideoSearch>) -> Self {
        self.video_search = Some(video_search);
        self
    }

    pub fn has_web_search(&self) -> bool {
        self.web_search.is_some()
    }

    pub fn has_video_search(&self) -> bool {
        self.video_search.is_some()
    }

    pub async fn generate(&self, req: &PlanRequest) -> Result<LearningPlan, GenerateError> {
        req.validate()
            .map_err(|e| GenerateError::Invalid(validation_message(e)))?;

        let prompt = build_prompt(req);
        info!(goal = %req.goal.trim(), "Generating learning plan");

        let reply = self.llm.complete(SYSTEM_PROMPT, &prompt).await?;
        debug!(reply_len = reply.len(), "Completion received");

        let mut plan = parse_plan_reply(&reply).ok_or(GenerateError::Unparseable)?;
        plan.fill_defaults(req);

        // Checked before any outbound link or search traffic
        if !plan.is_usable() {
            return Err(GenerateError::Empty);
        }

        // Queries use the learner's subject, not the model's restatement of it
        let goal = req.goal.trim().to_string();
        let desired = req.desired_resource_types();

        for week in &mut plan.weeks {
            self.validate_links(week).await;
            self.backfill(week, &goal, &desired).await;
            self.attach_best_video(week, &goal).await;
        }

        info!(weeks = plan.weeks.len(), "Learning plan ready");
        Ok(plan)
    }

    /// Drop resources whose links are empty or do not answer
    async fn validate_links(&self, week: &mut Week) {
        let resources = std::mem::take(&mut week.resources);
        let checks = resources.iter().map(|r| async move {
            let link = r.link.trim();
            !link.is_empty() && self.link_checker.is_valid(link).await
        });
        let verdicts = join_all(checks).await;

        let before = resources.len();
        week.resources = resources
            .into_iter()
            .zip(verdicts)
            .filter_map(|(r, ok)| ok.then_some(r))
            .collect();

        if week.resources.len() < before {
            debug!(
                week = ?week.week_number,
                dropped = before - week.resources.len(),
                "Dropped unreachable resources"
            );
        }
    }

    /// Search for each desired resource type the week lacks
    async fn backfill(&self, week: &mut Week, goal: &str, desired: &[&str]) {
        let Some(search) = &self.web_search else {
            return;
        };

        let missing: Vec<&str> = desired
            .iter()
            .copied()
            .filter(|t| !week.has_resource_type(t))
            .collect();

        for kind in missing {
            let query = backfill_query(goal, &week.objective, kind);
            let found: Vec<Resource> = search.search(&query, BACKFILL_RESULTS, kind).await;
            if found.is_empty() {
                warn!(week = ?week.week_number, kind, "No fallback resource found");
            }
            week.resources.extend(found);
        }
    }

    async fn attach_best_video(&self, week: &mut Week, goal: &str) {
        let Some(videos) = &self.video_search else {
            return;
        };
        let query = video_query(goal, &week.objective);
        week.best_video = videos.best_video(&query).await;
    }
}

pub fn backfill_query(goal: &str, objective: &str, kind: &str) -> String {
    format!("{} {} {}", goal, objective, kind)
}

pub fn video_query(goal: &str, objective: &str) -> String {
    format!("{} {}", goal, objective)
}

fn validation_message(err: lpg_common::Error) -> String {
    match err {
        lpg_common::Error::InvalidInput(msg) => msg,
        other => other.to_string(),
    }
}
