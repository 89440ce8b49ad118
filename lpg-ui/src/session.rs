//! Session middleware for lpg-ui
//!
//! Sessions are random tokens in the `lpg_session` cookie, backed by the
//! `sessions` table. Protected routes get the signed-in user as a request
//! extension.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use lpg_common::cookies::{find_cookie, USER_SESSION_COOKIE};
use lpg_common::db::{self, User};
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::AppState;

/// Signed-in user, inserted by the session middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Session token carried by the request, if any
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let values = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok());
    find_cookie(values, USER_SESSION_COOKIE)
}

/// Resolve the session cookie to a user
pub async fn user_from_headers(pool: &SqlitePool, headers: &HeaderMap) -> lpg_common::Result<Option<User>> {
    match session_token(headers) {
        Some(token) => db::session_user(pool, &token).await,
        None => Ok(None),
    }
}

/// HTML routes: anonymous requests are sent to the login page
pub async fn require_user(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match user_from_headers(&state.db, request.headers()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// JSON routes: anonymous requests get 401
pub async fn require_api_user(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match user_from_headers(&state.db, request.headers()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(None) => ApiError::Unauthorized.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
