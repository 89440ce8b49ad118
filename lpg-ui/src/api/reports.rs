//! Issue reports from the plan page

use axum::{
    extract::State,
    middleware,
    response::Redirect,
    routing::post,
    Extension, Form, Router,
};
use lpg_common::db;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::session::{require_user, CurrentUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub description: String,
    /// Plan the report was filed from; only the user's own plans are returned to
    pub plan_id: Option<String>,
}

pub fn report_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/reports", post(submit_report))
        .layer(middleware::from_fn_with_state(state, require_user))
}

/// POST /reports
///
/// Blank descriptions are ignored rather than rejected.
async fn submit_report(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<ReportForm>,
) -> ApiResult<Redirect> {
    let back = match form.plan_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => match db::get_plan_for_user(&state.db, &user.guid, id).await? {
            Some(record) => format!("/plans/{}", record.guid),
            None => "/plans".to_string(),
        },
        None => "/plans".to_string(),
    };

    if form.description.trim().is_empty() {
        debug!(user_id = %user.guid, "Ignoring empty issue report");
        return Ok(Redirect::to(&back));
    }

    db::insert_report(&state.db, Some(&user.email), &form.description).await?;
    let separator = if back.contains('?') { '&' } else { '?' };
    Ok(Redirect::to(&format!("{}{}reported=1", back, separator)))
}
