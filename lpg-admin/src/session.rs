//! Admin session middleware
//!
//! Tokens are random hex kept in memory, so every restart signs admins out.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use lpg_common::auth::generate_token;
use lpg_common::cookies::{find_cookie, ADMIN_SESSION_COOKIE};

use crate::error::ApiError;
use crate::AppState;

/// Admin session token carried by the request, if any
pub fn admin_token(headers: &HeaderMap) -> Option<String> {
    let values = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok());
    find_cookie(values, ADMIN_SESSION_COOKIE)
}

pub async fn is_signed_in(state: &AppState, headers: &HeaderMap) -> bool {
    match admin_token(headers) {
        Some(token) => state.sessions.read().await.contains(&token),
        None => false,
    }
}

/// Open a session and return its token
pub async fn open_session(state: &AppState) -> String {
    let token = generate_token();
    state.sessions.write().await.insert(token.clone());
    token
}

pub async fn close_session(state: &AppState, token: &str) {
    state.sessions.write().await.remove(token);
}

/// HTML pages: anonymous requests go to the login form
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if is_signed_in(&state, request.headers()).await {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}

/// JSON endpoints: anonymous requests get 401
pub async fn require_admin_api(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if is_signed_in(&state, request.headers()).await {
        next.run(request).await
    } else {
        ApiError::Unauthorized.into_response()
    }
}
