//! Liveness plus a quick look at what the generator can reach

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub build: String,
    pub uptime_seconds: u64,
    /// "ok" when a trivial query succeeds
    pub database: String,
    pub web_search: bool,
    pub video_search: bool,
}

/// GET /health
///
/// Always 200; a broken database shows up as `"database": "unavailable"`
/// with `status` set to `"degraded"`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    let uptime = Utc::now() - state.startup_time;

    Json(HealthResponse {
        status: if database_ok { "ok" } else { "degraded" }.to_string(),
        module: "lpg-ui".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: env!("GIT_HASH").to_string(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
        database: if database_ok { "ok" } else { "unavailable" }.to_string(),
        web_search: state.generator.has_web_search(),
        video_search: state.generator.has_video_search(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
