//! Login sessions backing the `lpg_session` cookie

use sqlx::SqlitePool;

use super::{now_timestamp, User};
use crate::auth::generate_token;
use crate::Result;

/// Open a session for `user_id` and return its token
pub async fn create_session(pool: &SqlitePool, user_id: &str) -> Result<String> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(now_timestamp())
        .execute(pool)
        .await?;
    Ok(token)
}

/// User owning `token`, if the session exists
pub async fn session_user(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.* FROM sessions s JOIN users u ON u.guid = s.user_id WHERE s.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
