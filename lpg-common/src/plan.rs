//! Learning plan model
//!
//! A plan is produced by a single LLM completion and stored as JSON text.
//! Model replies are loosely structured, so deserialization is lenient:
//! missing fields default, numbers may arrive as strings, nulls read as
//! absent, and action items may be bare strings.

use once_cell::sync::Lazy;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::{Error, Result};

/// Greedy match from the first `{` to the last `}` across newlines
static JSON_OBJECT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Title used when a plan has no goal
pub const UNNAMED_PLAN: &str = "Unnamed Plan";

// ========================================
// Request side
// ========================================

/// Preferred learning method chosen on the plan form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    Videos,
    Articles,
    #[serde(rename = "Hands-on Projects")]
    HandsOnProjects,
    Podcasts,
    Books,
}

impl LearningStyle {
    /// All styles in form display order
    pub const ALL: [LearningStyle; 5] = [
        LearningStyle::Videos,
        LearningStyle::Articles,
        LearningStyle::HandsOnProjects,
        LearningStyle::Podcasts,
        LearningStyle::Books,
    ];

    /// Label shown to the user and embedded in prompts
    pub fn label(&self) -> &'static str {
        match self {
            LearningStyle::Videos => "Videos",
            LearningStyle::Articles => "Articles",
            LearningStyle::HandsOnProjects => "Hands-on Projects",
            LearningStyle::Podcasts => "Podcasts",
            LearningStyle::Books => "Books",
        }
    }

    /// Resource type a week must contain to satisfy this style
    pub fn resource_type(&self) -> &'static str {
        match self {
            LearningStyle::Videos => "video",
            LearningStyle::Articles => "article",
            LearningStyle::HandsOnProjects => "project",
            LearningStyle::Podcasts => "podcast",
            LearningStyle::Books => "book",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Self-assessed expertise level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExpertiseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExpertiseLevel {
    pub const ALL: [ExpertiseLevel; 3] = [
        ExpertiseLevel::Beginner,
        ExpertiseLevel::Intermediate,
        ExpertiseLevel::Advanced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpertiseLevel::Beginner => "Beginner",
            ExpertiseLevel::Intermediate => "Intermediate",
            ExpertiseLevel::Advanced => "Advanced",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }
}

impl fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall plan duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeline {
    #[default]
    #[serde(rename = "4 weeks")]
    FourWeeks,
    #[serde(rename = "8 weeks")]
    EightWeeks,
    #[serde(rename = "12 weeks")]
    TwelveWeeks,
    #[serde(rename = "Self-paced")]
    SelfPaced,
}

impl Timeline {
    pub const ALL: [Timeline; 4] = [
        Timeline::FourWeeks,
        Timeline::EightWeeks,
        Timeline::TwelveWeeks,
        Timeline::SelfPaced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Timeline::FourWeeks => "4 weeks",
            Timeline::EightWeeks => "8 weeks",
            Timeline::TwelveWeeks => "12 weeks",
            Timeline::SelfPaced => "Self-paced",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum hours per week accepted on the form
pub const MIN_WEEKLY_HOURS: u32 = 1;
/// Maximum hours per week accepted on the form
pub const MAX_WEEKLY_HOURS: u32 = 40;
/// Form default for hours per week
pub const DEFAULT_WEEKLY_HOURS: u32 = 5;

/// Answers to the ten plan questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// What the user wants to learn (required)
    pub goal: String,
    pub topics: String,
    pub primary_objective: String,
    pub background_level: ExpertiseLevel,
    pub learning_style: Vec<LearningStyle>,
    pub weekly_time: u32,
    pub timeline: Timeline,
    pub future_goals: String,
    pub challenges: String,
    pub additional_info: String,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            goal: String::new(),
            topics: String::new(),
            primary_objective: String::new(),
            background_level: ExpertiseLevel::default(),
            learning_style: vec![LearningStyle::Videos, LearningStyle::Articles],
            weekly_time: DEFAULT_WEEKLY_HOURS,
            timeline: Timeline::default(),
            future_goals: String::new(),
            challenges: String::new(),
            additional_info: String::new(),
        }
    }
}

impl PlanRequest {
    /// Reject requests the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.goal.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Please specify what you want to learn.".to_string(),
            ));
        }
        if !(MIN_WEEKLY_HOURS..=MAX_WEEKLY_HOURS).contains(&self.weekly_time) {
            return Err(Error::InvalidInput(format!(
                "Weekly time must be between {} and {} hours.",
                MIN_WEEKLY_HOURS, MAX_WEEKLY_HOURS
            )));
        }
        Ok(())
    }

    /// Resource types every week should contain, in style order
    pub fn desired_resource_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = Vec::new();
        for style in &self.learning_style {
            let t = style.resource_type();
            if !types.contains(&t) {
                types.push(t);
            }
        }
        types
    }

    fn style_labels(&self) -> Vec<String> {
        self.learning_style.iter().map(|s| s.label().to_string()).collect()
    }
}

/// Build the coaching prompt sent as the user message
pub fn build_prompt(req: &PlanRequest) -> String {
    let styles = req.style_labels().join(", ");
    format!(
        r#"
You are an expert learning coach. A user wants to learn about {goal}.
The user is interested in the following topics: {topics}.
Their primary objective is: {objective}.
They aim to achieve: {future}.
They mention the following challenges: {challenges}.
Additional information: {additional}.
They are at a {level} level and prefer these learning styles: {styles}.
They can dedicate about {hours} hours per week and their timeline is {timeline}.

Provide a structured weekly learning plan where each week includes:
- A clear objective.
- 2-3 suggested resources with direct links and resource types (video, article, podcast, project).
  * If "Podcasts" is in the user's learning style, include at least one resource of type "podcast".
  * If "Hands-on Projects" is in the user's learning style, include a detailed hands-on project description as a resource of type "project".
- 2-3 action items with short due-by estimates.

Return your answer strictly in JSON format with the structure:
{{
    "goal": "...",
    "timeline": "...",
    "learning_style": [...],
    "background_level": "...",
    "weekly_time": ...,
    "weeks": [
        {{
            "week_number": 1,
            "objective": "...",
            "resources": [
                {{
                    "name": "...",
                    "link": "...",
                    "type": "..."
                }}
            ],
            "action_items": [
                {{
                    "description": "...",
                    "due_by": "..."
                }}
            ]
        }}
    ]
}}
"#,
        goal = req.goal.trim(),
        topics = req.topics.trim(),
        objective = req.primary_objective.trim(),
        future = req.future_goals.trim(),
        challenges = req.challenges.trim(),
        additional = req.additional_info.trim(),
        level = req.background_level,
        styles = styles,
        hours = req.weekly_time,
        timeline = req.timeline,
    )
}

// ========================================
// Plan document
// ========================================

/// Weekly time as reported by the model: usually hours, sometimes prose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeeklyTime {
    Hours(u64),
    Fractional(f64),
    Text(String),
}

impl fmt::Display for WeeklyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeeklyTime::Hours(h) => write!(f, "{}", h),
            WeeklyTime::Fractional(h) => write!(f, "{}", h),
            WeeklyTime::Text(s) => f.write_str(s),
        }
    }
}

/// External learning resource attached to a week
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, link: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            kind: kind.into(),
        }
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.trim().eq_ignore_ascii_case(kind)
    }
}

/// Task the learner ticks off during a week
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawActionItem")]
pub struct ActionItem {
    pub description: String,
    pub due_by: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActionItem {
    Text(String),
    Item {
        #[serde(default, deserialize_with = "lenient_string")]
        description: String,
        #[serde(default, deserialize_with = "lenient_opt_string")]
        due_by: Option<String>,
    },
}

impl From<RawActionItem> for ActionItem {
    fn from(raw: RawActionItem) -> Self {
        match raw {
            RawActionItem::Text(description) => ActionItem {
                description,
                due_by: None,
            },
            RawActionItem::Item {
                description,
                due_by,
            } => ActionItem {
                description,
                due_by,
            },
        }
    }
}

/// Highest-ranked video found for a week's objective
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BestVideo {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub view_count: u64,
}

/// One week of a plan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Week {
    #[serde(default, deserialize_with = "lenient_number")]
    pub week_number: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub objective: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub resources: Vec<Resource>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub action_items: Vec<ActionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_video: Option<BestVideo>,
}

impl Week {
    /// Case-insensitive check for a resource of `kind`
    pub fn has_resource_type(&self, kind: &str) -> bool {
        self.resources.iter().any(|r| r.is_kind(kind))
    }
}

/// Learning plan document as stored and rendered
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearningPlan {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub timeline: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_vec")]
    pub learning_style: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub background_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_weekly_time")]
    pub weekly_time: Option<WeeklyTime>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub weeks: Vec<Week>,
}

impl LearningPlan {
    /// Fill request answers into fields the model left out.
    /// Fields the model did return are kept as-is.
    pub fn fill_defaults(&mut self, req: &PlanRequest) {
        if self.goal.is_none() {
            self.goal = Some(req.goal.trim().to_string());
        }
        if self.timeline.is_none() {
            self.timeline = Some(req.timeline.label().to_string());
        }
        if self.learning_style.is_none() {
            self.learning_style = Some(req.style_labels());
        }
        if self.background_level.is_none() {
            self.background_level = Some(req.background_level.label().to_string());
        }
        if self.weekly_time.is_none() {
            self.weekly_time = Some(WeeklyTime::Hours(u64::from(req.weekly_time)));
        }
    }

    /// A plan is only worth saving when it has weeks
    pub fn is_usable(&self) -> bool {
        !self.weeks.is_empty()
    }

    pub fn title(&self) -> String {
        match self.goal.as_deref().map(str::trim) {
            Some(goal) if !goal.is_empty() => goal.to_string(),
            _ => UNNAMED_PLAN.to_string(),
        }
    }

    pub fn goal_str(&self) -> &str {
        self.goal.as_deref().unwrap_or("")
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored plan
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Locate a JSON object embedded in free text (greedy, first `{` to last `}`)
pub fn extract_json(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Parse a model reply into a plan.
///
/// Tries the whole reply first, then the embedded object found by
/// [`extract_json`]. Returns `None` when neither parses.
pub fn parse_plan_reply(text: &str) -> Option<LearningPlan> {
    if let Ok(plan) = serde_json::from_str::<LearningPlan>(text.trim()) {
        return Some(plan);
    }
    let candidate = extract_json(text)?;
    match serde_json::from_str::<LearningPlan>(candidate) {
        Ok(plan) => Some(plan),
        Err(e) => {
            tracing::debug!(error = %e, "Extracted JSON did not parse as a plan");
            None
        }
    }
}

// ========================================
// Lenient field readers
// ========================================

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .and_then(value_to_string)
        .unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(value_to_string))
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<u32>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Numbers and scalars are kept; arrays and objects are dropped
fn lenient_weekly_time<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<WeeklyTime>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| match v {
        Value::Number(n) => match n.as_u64() {
            Some(h) => Some(WeeklyTime::Hours(h)),
            None => n.as_f64().map(WeeklyTime::Fractional),
        },
        Value::String(s) => Some(WeeklyTime::Text(s)),
        Value::Bool(b) => Some(WeeklyTime::Text(b.to_string())),
        _ => None,
    }))
}

/// Skip elements that do not fit `T` instead of failing the whole plan
fn lenient_vec<'de, D, T>(d: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_opt_vec(d)?.unwrap_or_default())
}

fn lenient_opt_vec<'de, D, T>(d: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> PlanRequest {
        PlanRequest {
            goal: "Rust".to_string(),
            topics: "ownership, async".to_string(),
            learning_style: vec![LearningStyle::Videos, LearningStyle::Podcasts],
            weekly_time: 6,
            timeline: Timeline::EightWeeks,
            background_level: ExpertiseLevel::Intermediate,
            ..PlanRequest::default()
        }
    }

    #[test]
    fn test_extract_json_spans_first_to_last_brace() {
        let reply = "Sure! Here it is:\n```json\n{\"goal\": \"x\", \"weeks\": [{}]}\n```\nEnjoy {:}";
        let extracted = extract_json(reply).unwrap();
        assert!(extracted.starts_with("{\"goal\""));
        assert!(extracted.ends_with("{:}"));
    }

    #[test]
    fn test_extract_json_none_without_braces() {
        assert_eq!(extract_json("no json here"), None);
    }

    #[test]
    fn test_parse_plain_json_reply() {
        let reply = r#"{"goal": "Rust", "weeks": [{"week_number": 1, "objective": "Basics",
            "resources": [{"name": "Book", "link": "https://doc.rust-lang.org/book/", "type": "article"}],
            "action_items": [{"description": "Install rustup", "due_by": "Day 1"}]}]}"#;
        let plan = parse_plan_reply(reply).unwrap();
        assert_eq!(plan.goal.as_deref(), Some("Rust"));
        assert_eq!(plan.weeks.len(), 1);
        assert_eq!(plan.weeks[0].week_number, Some(1));
        assert_eq!(plan.weeks[0].resources[0].kind, "article");
        assert_eq!(plan.weeks[0].action_items[0].due_by.as_deref(), Some("Day 1"));
    }

    #[test]
    fn test_parse_reply_with_surrounding_prose() {
        let reply = "Here is your plan:\n{\"goal\": \"Go\", \"weeks\": [{\"objective\": \"Syntax\"}]}\nGood luck!";
        let plan = parse_plan_reply(reply).unwrap();
        assert_eq!(plan.title(), "Go");
        assert_eq!(plan.weeks[0].objective, "Syntax");
    }

    #[test]
    fn test_parse_unparseable_reply() {
        assert!(parse_plan_reply("I cannot help with that.").is_none());
        assert!(parse_plan_reply("{ not json }").is_none());
    }

    #[test]
    fn test_lenient_fields() {
        let reply = r#"{"goal": null, "weekly_time": "5 hours", "weeks": [
            {"week_number": "2", "objective": null,
             "resources": [{"name": "A", "link": "https://a.example", "type": "Video"}, "garbage"],
             "action_items": ["Read chapter 1", {"description": "Quiz", "due_by": null}]}]}"#;
        let plan = parse_plan_reply(reply).unwrap();
        assert_eq!(plan.goal, None);
        assert_eq!(plan.weekly_time, Some(WeeklyTime::Text("5 hours".to_string())));
        let week = &plan.weeks[0];
        assert_eq!(week.week_number, Some(2));
        assert_eq!(week.objective, "");
        assert_eq!(week.resources.len(), 1);
        assert!(week.has_resource_type("video"));
        assert_eq!(week.action_items[0].description, "Read chapter 1");
        assert_eq!(week.action_items[0].due_by, None);
        assert_eq!(week.action_items[1].description, "Quiz");
    }

    #[test]
    fn test_odd_weekly_time_keeps_plan() {
        let plan = parse_plan_reply(r#"{"goal":"Rust","weekly_time":true,"weeks":[{"objective":"Basics"}]}"#)
            .unwrap();
        assert_eq!(plan.weekly_time, Some(WeeklyTime::Text("true".to_string())));
        assert_eq!(plan.weeks[0].objective, "Basics");

        let plan = parse_plan_reply(r#"{"weekly_time": {"hours": 5}, "weeks": [{}]}"#).unwrap();
        assert_eq!(plan.weekly_time, None);
        assert_eq!(plan.weeks.len(), 1);

        let plan = parse_plan_reply(r#"{"weekly_time": 7.5, "weeks": [{}]}"#).unwrap();
        assert_eq!(plan.weekly_time, Some(WeeklyTime::Fractional(7.5)));
    }

    #[test]
    fn test_fill_defaults_keeps_model_values() {
        let mut plan = parse_plan_reply(r#"{"goal": "Rust async", "weeks": [{}]}"#).unwrap();
        plan.fill_defaults(&sample_request());
        assert_eq!(plan.goal.as_deref(), Some("Rust async"));
        assert_eq!(plan.timeline.as_deref(), Some("8 weeks"));
        assert_eq!(plan.background_level.as_deref(), Some("Intermediate"));
        assert_eq!(
            plan.learning_style,
            Some(vec!["Videos".to_string(), "Podcasts".to_string()])
        );
        assert_eq!(plan.weekly_time, Some(WeeklyTime::Hours(6)));
    }

    #[test]
    fn test_desired_resource_types() {
        let mut req = sample_request();
        req.learning_style.push(LearningStyle::HandsOnProjects);
        assert_eq!(req.desired_resource_types(), vec!["video", "podcast", "project"]);
    }

    #[test]
    fn test_validate_requires_goal() {
        let req = PlanRequest {
            goal: "   ".to_string(),
            ..PlanRequest::default()
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Please specify what you want to learn."));
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_validate_weekly_time_bounds() {
        let mut req = sample_request();
        req.weekly_time = 0;
        assert!(req.validate().is_err());
        req.weekly_time = 41;
        assert!(req.validate().is_err());
        req.weekly_time = 40;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_title_fallback() {
        let plan = LearningPlan::default();
        assert_eq!(plan.title(), UNNAMED_PLAN);
        assert!(!plan.is_usable());
    }

    #[test]
    fn test_stored_plan_round_trip() {
        let mut plan = parse_plan_reply(r#"{"weeks": [{"week_number": 1, "action_items": ["x"]}]}"#).unwrap();
        plan.fill_defaults(&sample_request());
        plan.weeks[0].best_video = Some(BestVideo {
            title: "Intro".to_string(),
            link: "https://www.youtube.com/watch?v=abc".to_string(),
            channel: "Chan".to_string(),
            view_count: 42,
        });
        let stored = plan.to_json().unwrap();
        assert_eq!(LearningPlan::from_json(&stored).unwrap(), plan);
    }

    #[test]
    fn test_prompt_mentions_answers() {
        let prompt = build_prompt(&sample_request());
        assert!(prompt.contains("A user wants to learn about Rust."));
        assert!(prompt.contains("prefer these learning styles: Videos, Podcasts."));
        assert!(prompt.contains("about 6 hours per week and their timeline is 8 weeks."));
        assert!(prompt.contains("\"week_number\": 1"));
    }

    #[test]
    fn test_style_labels_round_trip() {
        for style in LearningStyle::ALL {
            assert_eq!(LearningStyle::from_label(style.label()), Some(style));
        }
        assert_eq!(LearningStyle::from_label("Dance"), None);
        assert_eq!(ExpertiseLevel::from_label("Advanced"), Some(ExpertiseLevel::Advanced));
        assert_eq!(Timeline::from_label("Self-paced"), Some(Timeline::SelfPaced));
        assert_eq!(Timeline::from_label("3 weeks"), None);
    }
}
