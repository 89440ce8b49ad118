//! Admin login and logout

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use lpg_common::cookies::{clear_cookie, session_cookie, ADMIN_SESSION_COOKIE};
use serde::Deserialize;
use tracing::{info, warn};

use super::ui;
use crate::session::{admin_token, close_session, open_session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

async fn login_page() -> Html<String> {
    Html(ui::login_page(None))
}

/// POST /login
async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if !state.credentials.matches(&form.email, &form.password) {
        warn!("Rejected admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Html(ui::login_page(Some("Invalid admin credentials."))),
        )
            .into_response();
    }

    let token = open_session(&state).await;
    info!("Admin logged in");
    (
        [(header::SET_COOKIE, session_cookie(ADMIN_SESSION_COOKIE, &token))],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// POST /logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = admin_token(&headers) {
        close_session(&state, &token).await;
    }
    (
        [(header::SET_COOKIE, clear_cookie(ADMIN_SESSION_COOKIE))],
        Redirect::to("/login"),
    )
        .into_response()
}
