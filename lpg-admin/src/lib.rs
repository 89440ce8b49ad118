//! lpg-admin library - admin dashboard over the LPG database
//!
//! The database is opened read-only; admin sessions live in memory only.

use axum::Router;
use chrono::{DateTime, Utc};
use lpg_common::config::AdminCredentials;
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod session;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
    /// Configured admin login
    pub credentials: Arc<AdminCredentials>,
    /// Tokens of signed-in admin sessions
    pub sessions: Arc<RwLock<HashSet<String>>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, credentials: AdminCredentials) -> Self {
        Self {
            db,
            credentials: Arc::new(credentials),
            sessions: Arc::new(RwLock::new(HashSet::new())),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Health and login are public; everything else needs an admin session.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let pages = Router::new()
        .route("/", get(api::root))
        .route("/dashboard", get(api::dashboard_page))
        .route("/users", get(api::users_page))
        .route("/plans", get(api::plans_page))
        .route("/reports", get(api::reports_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_admin,
        ));

    let json = Router::new()
        .route("/api/dashboard", get(api::dashboard_json))
        .route("/api/users", get(api::users_json))
        .route("/api/plans", get(api::plans_json))
        .route("/api/reports", get(api::reports_json))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_admin_api,
        ));

    Router::new()
        .merge(pages)
        .merge(json)
        .merge(api::auth_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
