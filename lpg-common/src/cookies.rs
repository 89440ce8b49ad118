//! Session cookie helpers
//!
//! Framework-free: callers pass raw `Cookie` header values and send the
//! returned strings as `Set-Cookie`.

/// Cookie carrying a user session in lpg-ui
pub const USER_SESSION_COOKIE: &str = "lpg_session";

/// Cookie carrying an admin session in lpg-admin
pub const ADMIN_SESSION_COOKIE: &str = "lpg_admin";

/// Find `name` in one or more `Cookie` header values
pub fn find_cookie<'a>(headers: impl IntoIterator<Item = &'a str>, name: &str) -> Option<String> {
    headers
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value opening a session
pub fn session_cookie(name: &str, token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, token)
}

/// `Set-Cookie` value expiring a session
pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}
