//! User accounts

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::{now_timestamp, User, UserOverview};
use crate::auth::{generate_salt, hash_password, normalize_email, validate_password, verify_password};
use crate::{Error, Result};

/// Register a new account.
///
/// New users start with `time_spent = 0` and a UTC `created_at`.
pub async fn create_user(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email)?;
    validate_password(password)?;

    let salt = generate_salt();
    let user = User {
        guid: Uuid::new_v4().to_string(),
        email,
        password_hash: hash_password(password, &salt),
        password_salt: salt,
        phone: None,
        time_spent: 0,
        created_at: now_timestamp(),
    };

    let result = sqlx::query(
        "INSERT INTO users (guid, email, password_hash, password_salt, phone, time_spent, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.guid)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.password_salt)
    .bind(&user.phone)
    .bind(user.time_spent)
    .bind(&user.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!(user_id = %user.guid, "Created account for {}", user.email);
            Ok(user)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(Error::DuplicateEmail(user.email))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let email = email.trim().to_lowercase();
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user(pool: &SqlitePool, guid: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE guid = ?")
        .bind(guid)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Check credentials; unknown email and wrong password are indistinguishable
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    let user = find_user_by_email(pool, email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &user.password_salt, &user.password_hash) {
        return Err(Error::InvalidCredentials);
    }
    Ok(user)
}

/// Every user with their plan count, optionally filtered by a
/// case-insensitive email substring
pub async fn list_users_with_plan_counts(
    pool: &SqlitePool,
    email_filter: Option<&str>,
) -> Result<Vec<UserOverview>> {
    let rows = sqlx::query_as::<_, UserOverview>(
        "SELECT u.email AS email, u.phone AS phone, COUNT(p.guid) AS plan_count
         FROM users u
         LEFT JOIN learning_plans p ON p.user_id = u.guid
         GROUP BY u.guid
         ORDER BY u.created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(match normalized_filter(email_filter) {
        Some(needle) => rows
            .into_iter()
            .filter(|u| u.email.to_lowercase().contains(&needle))
            .collect(),
        None => rows,
    })
}

/// Lower-cased search term, or `None` for blank input
pub(crate) fn normalized_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}
