//! Sign-up, login and logout

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use lpg_common::cookies::{clear_cookie, session_cookie, USER_SESSION_COOKIE};
use lpg_common::db;
use serde::Deserialize;
use tracing::{info, warn};

use super::ui::{self, AuthMode};
use crate::error::ApiResult;
use crate::session::{session_token, user_from_headers};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
}

/// GET /
async fn root(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Redirect> {
    Ok(match user_from_headers(&state.db, &headers).await? {
        Some(_) => Redirect::to("/plans"),
        None => Redirect::to("/login"),
    })
}

async fn login_page() -> Html<String> {
    Html(ui::auth_page(AuthMode::Login, None, None))
}

async fn signup_page() -> Html<String> {
    Html(ui::auth_page(AuthMode::SignUp, None, None))
}

/// Redirect to the workspace with a fresh session cookie
async fn start_session(state: &AppState, user_id: &str) -> ApiResult<Response> {
    let token = db::create_session(&state.db, user_id).await?;
    Ok((
        [(header::SET_COOKIE, session_cookie(USER_SESSION_COOKIE, &token))],
        Redirect::to("/plans"),
    )
        .into_response())
}

/// POST /login
async fn login(State(state): State<AppState>, Form(form): Form<Credentials>) -> ApiResult<Response> {
    match db::authenticate(&state.db, &form.email, &form.password).await {
        Ok(user) => {
            info!(user_id = %user.guid, "User logged in");
            start_session(&state, &user.guid).await
        }
        Err(lpg_common::Error::InvalidCredentials) | Err(lpg_common::Error::InvalidInput(_)) => {
            warn!("Rejected login attempt");
            Ok((
                StatusCode::UNAUTHORIZED,
                Html(ui::auth_page(
                    AuthMode::Login,
                    Some("Login error: invalid email or password."),
                    None,
                )),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /signup
async fn signup(State(state): State<AppState>, Form(form): Form<Credentials>) -> ApiResult<Response> {
    match db::create_user(&state.db, &form.email, &form.password).await {
        Ok(user) => {
            info!(user_id = %user.guid, "Account created");
            start_session(&state, &user.guid).await
        }
        Err(e @ (lpg_common::Error::DuplicateEmail(_) | lpg_common::Error::InvalidInput(_))) => {
            let message = match e {
                lpg_common::Error::InvalidInput(msg) => format!("Sign-up error: {}", msg),
                other => format!("Sign-up error: {}", other),
            };
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::auth_page(AuthMode::SignUp, Some(&message), None)),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    if let Some(token) = session_token(&headers) {
        db::delete_session(&state.db, &token).await?;
    }
    Ok((
        [(header::SET_COOKIE, clear_cookie(USER_SESSION_COOKIE))],
        Redirect::to("/login"),
    )
        .into_response())
}
