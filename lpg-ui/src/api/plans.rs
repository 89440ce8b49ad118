//! Learning plan pages and JSON views

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use lpg_common::db::{self, PlanRecord, PlanSummary, ProgressEntry};
use lpg_common::plan::{ExpertiseLevel, LearningPlan, LearningStyle, PlanRequest, Timeline};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ui::{self, Flash};
use crate::error::{ApiError, ApiResult};
use crate::services::GenerateError;
use crate::session::{require_api_user, require_user, CurrentUser};
use crate::AppState;

/// Raw answers posted by the plan form
#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub topics: String,
    #[serde(default)]
    pub primary_objective: String,
    #[serde(default)]
    pub background_level: String,
    pub style_videos: Option<String>,
    pub style_articles: Option<String>,
    pub style_projects: Option<String>,
    pub style_podcasts: Option<String>,
    pub style_books: Option<String>,
    #[serde(default)]
    pub weekly_time: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub future_goals: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub additional_info: String,
}

impl PlanForm {
    /// Unknown select values fall back to defaults; an unreadable hour count
    /// becomes 0 so validation rejects it.
    pub fn into_request(self) -> PlanRequest {
        let checked = [
            (LearningStyle::Videos, self.style_videos.is_some()),
            (LearningStyle::Articles, self.style_articles.is_some()),
            (LearningStyle::HandsOnProjects, self.style_projects.is_some()),
            (LearningStyle::Podcasts, self.style_podcasts.is_some()),
            (LearningStyle::Books, self.style_books.is_some()),
        ];

        PlanRequest {
            goal: self.goal,
            topics: self.topics,
            primary_objective: self.primary_objective,
            background_level: ExpertiseLevel::from_label(self.background_level.trim())
                .unwrap_or_default(),
            learning_style: checked
                .into_iter()
                .filter_map(|(style, on)| on.then_some(style))
                .collect(),
            weekly_time: self.weekly_time.trim().parse().unwrap_or(0),
            timeline: Timeline::from_label(self.timeline.trim()).unwrap_or_default(),
            future_goals: self.future_goals,
            challenges: self.challenges,
            additional_info: self.additional_info,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub saved: Option<String>,
    pub rated: Option<String>,
    pub reported: Option<String>,
}

impl From<FlashQuery> for Flash {
    fn from(q: FlashQuery) -> Self {
        Flash {
            saved: q.saved.is_some(),
            rated: q.rated.is_some(),
            reported: q.reported.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressForm {
    pub week_index: i64,
    pub item_index: i64,
    /// Present only when the checkbox is ticked
    pub completed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatingForm {
    pub rating: i64,
}

/// JSON view of one saved plan
#[derive(Debug, Serialize)]
pub struct PlanDetail {
    pub id: String,
    pub title: String,
    pub rating: Option<i64>,
    pub created_at: String,
    pub plan: LearningPlan,
    pub progress: Vec<ProgressEntry>,
}

pub fn plan_routes(state: AppState) -> Router<AppState> {
    let pages = Router::new()
        .route("/plans", get(plans_index).post(create_plan))
        .route("/plans/new", get(new_plan))
        .route("/plans/:id", get(show_plan))
        .route("/plans/:id/progress", post(update_progress))
        .route("/plans/:id/rating", post(rate_plan))
        .layer(middleware::from_fn_with_state(state.clone(), require_user));

    let api = Router::new()
        .route("/api/plans", get(api_list_plans))
        .route("/api/plans/:id", get(api_get_plan))
        .layer(middleware::from_fn_with_state(state, require_api_user));

    Router::new().merge(pages).merge(api)
}

async fn load_plan(state: &AppState, user_id: &str, plan_id: &str) -> ApiResult<(PlanRecord, LearningPlan)> {
    let record = db::get_plan_for_user(&state.db, user_id, plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Learning plan {}", plan_id)))?;
    let plan = LearningPlan::from_json(&record.plan)?;
    Ok((record, plan))
}

async fn sidebar(state: &AppState, user_id: &str) -> ApiResult<Vec<PlanSummary>> {
    Ok(db::list_plans_for_user(&state.db, user_id).await?)
}

/// GET /plans
async fn plans_index(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Html<String>> {
    let plans = sidebar(&state, &user.guid).await?;
    Ok(Html(ui::workspace(&user.email, &plans, &ui::no_plan_selected())))
}

/// GET /plans/new
async fn new_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Html<String>> {
    let plans = sidebar(&state, &user.guid).await?;
    let form = ui::plan_form(&PlanRequest::default(), None);
    Ok(Html(ui::workspace(&user.email, &plans, &form)))
}

/// POST /plans
async fn create_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<PlanForm>,
) -> ApiResult<Response> {
    let request = form.into_request();

    let failure = |status: StatusCode, message: String, plans: Vec<PlanSummary>| {
        let main = ui::plan_form(&request, Some(&message));
        (status, Html(ui::workspace(&user.email, &plans, &main))).into_response()
    };

    if let Err(e) = request.validate() {
        let message = match e {
            lpg_common::Error::InvalidInput(msg) => msg,
            other => other.to_string(),
        };
        let plans = sidebar(&state, &user.guid).await?;
        return Ok(failure(StatusCode::UNPROCESSABLE_ENTITY, message, plans));
    }

    match state.generator.generate(&request).await {
        Ok(plan) => {
            let plan_id = db::insert_plan(&state.db, &user.guid, &plan).await?;
            info!(plan_id = %plan_id, user_id = %user.guid, "Learning plan created");
            Ok(Redirect::to(&format!("/plans/{}?saved=1", plan_id)).into_response())
        }
        Err(GenerateError::Invalid(message)) => {
            let plans = sidebar(&state, &user.guid).await?;
            Ok(failure(StatusCode::UNPROCESSABLE_ENTITY, message, plans))
        }
        Err(e) => {
            warn!(user_id = %user.guid, error = %e, "Plan generation failed");
            let plans = sidebar(&state, &user.guid).await?;
            Ok(failure(StatusCode::BAD_GATEWAY, ui::GENERATION_FAILED.to_string(), plans))
        }
    }
}

/// GET /plans/:id
async fn show_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(plan_id): Path<String>,
    Query(flash): Query<FlashQuery>,
) -> ApiResult<Html<String>> {
    let (record, plan) = load_plan(&state, &user.guid, &plan_id).await?;
    let progress = db::progress_for_plan(&state.db, &record.guid).await?;
    let plans = sidebar(&state, &user.guid).await?;

    let main = ui::plan_view(&record, &plan, &progress, flash.into());
    Ok(Html(ui::workspace(&user.email, &plans, &main)))
}

/// POST /plans/:id/progress
async fn update_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(plan_id): Path<String>,
    Form(form): Form<ProgressForm>,
) -> ApiResult<Redirect> {
    let (record, plan) = load_plan(&state, &user.guid, &plan_id).await?;

    let known_item = usize::try_from(form.week_index)
        .ok()
        .and_then(|w| plan.weeks.get(w))
        .zip(usize::try_from(form.item_index).ok())
        .is_some_and(|(week, i)| i < week.action_items.len());
    if !known_item {
        return Err(ApiError::BadRequest(format!(
            "No action item {} in week {}",
            form.item_index, form.week_index
        )));
    }

    db::set_progress(
        &state.db,
        &record.guid,
        form.week_index,
        form.item_index,
        form.completed.is_some(),
    )
    .await?;
    Ok(Redirect::to(&format!("/plans/{}", record.guid)))
}

/// POST /plans/:id/rating
async fn rate_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(plan_id): Path<String>,
    Form(form): Form<RatingForm>,
) -> ApiResult<Redirect> {
    db::set_plan_rating(&state.db, &user.guid, &plan_id, form.rating).await?;
    info!(plan_id = %plan_id, rating = form.rating, "Plan rated");
    Ok(Redirect::to(&format!("/plans/{}?rated=1", plan_id)))
}

/// GET /api/plans
async fn api_list_plans(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<PlanSummary>>> {
    Ok(Json(sidebar(&state, &user.guid).await?))
}

/// GET /api/plans/:id
async fn api_get_plan(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(plan_id): Path<String>,
) -> ApiResult<Json<PlanDetail>> {
    let (record, plan) = load_plan(&state, &user.guid, &plan_id).await?;
    let progress = db::progress_for_plan(&state.db, &record.guid).await?;
    Ok(Json(PlanDetail {
        id: record.guid,
        title: record.title,
        rating: record.rating,
        created_at: record.created_at,
        plan,
        progress,
    }))
}
