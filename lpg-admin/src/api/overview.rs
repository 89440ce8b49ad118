//! Dashboard, users, learning plans and reported issues
//!
//! Each page has a JSON twin under `/api` returning the same rows.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Json,
};
use lpg_common::db::{self, DashboardStats, PlanOverview, Report, UserOverview};
use serde::Deserialize;

use super::ui;
use crate::error::ApiResult;
use crate::AppState;

/// `?search=` filter; blank means no filter
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

impl SearchQuery {
    fn term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|s| !s.is_empty())
    }
}

/// GET /
pub async fn root() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /dashboard
pub async fn dashboard_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let stats = db::dashboard_stats(&state.db).await?;
    Ok(Html(ui::dashboard(&stats)))
}

/// GET /api/dashboard
pub async fn dashboard_json(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(db::dashboard_stats(&state.db).await?))
}

/// GET /users?search=
pub async fn users_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Html<String>> {
    let rows = db::list_users_with_plan_counts(&state.db, query.term()).await?;
    Ok(Html(ui::users(&rows, &query.search)))
}

/// GET /api/users?search=
pub async fn users_json(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<UserOverview>>> {
    Ok(Json(db::list_users_with_plan_counts(&state.db, query.term()).await?))
}

/// GET /plans?search=
pub async fn plans_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Html<String>> {
    let rows = db::list_all_plans(&state.db, query.term()).await?;
    Ok(Html(ui::plans(&rows, &query.search)))
}

/// GET /api/plans?search=
pub async fn plans_json(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<PlanOverview>>> {
    Ok(Json(db::list_all_plans(&state.db, query.term()).await?))
}

/// GET /reports
pub async fn reports_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let rows = db::list_reports(&state.db).await?;
    Ok(Html(ui::reports(&rows)))
}

/// GET /api/reports
pub async fn reports_json(State(state): State<AppState>) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(db::list_reports(&state.db).await?))
}
