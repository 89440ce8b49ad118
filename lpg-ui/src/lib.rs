//! lpg-ui library interface
//!
//! Exposes the router and state so integration tests can drive the app
//! with fake outbound services.

pub mod api;
pub mod error;
pub mod services;
pub mod session;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::PlanGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Plan generation pipeline
    pub generator: Arc<PlanGenerator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, generator: PlanGenerator) -> Self {
        Self {
            db,
            generator: Arc::new(generator),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::auth_routes())
        .merge(api::plan_routes(state.clone()))
        .merge(api::report_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
