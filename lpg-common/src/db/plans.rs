//! Learning plan storage and action-item progress

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::users::normalized_filter;
use super::{now_timestamp, PlanOverview, PlanRecord, PlanSummary, ProgressEntry};
use crate::plan::LearningPlan;
use crate::{Error, Result};

/// Lowest and highest accepted plan rating
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// Store a generated plan as `{title: goal, plan: JSON text}` and return its id
pub async fn insert_plan(pool: &SqlitePool, user_id: &str, plan: &LearningPlan) -> Result<String> {
    if !plan.is_usable() {
        return Err(Error::InvalidInput("Plan has no weeks".to_string()));
    }

    let guid = Uuid::new_v4().to_string();
    let title = plan.title();
    sqlx::query(
        "INSERT INTO learning_plans (guid, user_id, title, plan, rating, created_at)
         VALUES (?, ?, ?, ?, NULL, ?)",
    )
    .bind(&guid)
    .bind(user_id)
    .bind(&title)
    .bind(plan.to_json()?)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    info!(plan_id = %guid, user_id = %user_id, weeks = plan.weeks.len(), "Saved learning plan \"{}\"", title);
    Ok(guid)
}

/// A user's saved plans, oldest first
pub async fn list_plans_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<PlanSummary>> {
    let rows = sqlx::query_as::<_, PlanSummary>(
        "SELECT guid, title, rating, created_at FROM learning_plans
         WHERE user_id = ?
         ORDER BY created_at ASC, rowid ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch a plan only if it belongs to `user_id`
pub async fn get_plan_for_user(
    pool: &SqlitePool,
    user_id: &str,
    plan_id: &str,
) -> Result<Option<PlanRecord>> {
    let record = sqlx::query_as::<_, PlanRecord>(
        "SELECT * FROM learning_plans WHERE guid = ? AND user_id = ?",
    )
    .bind(plan_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

pub async fn set_plan_rating(
    pool: &SqlitePool,
    user_id: &str,
    plan_id: &str,
    rating: i64,
) -> Result<()> {
    if !RATING_RANGE.contains(&rating) {
        return Err(Error::InvalidInput(format!(
            "Rating must be between {} and {}",
            RATING_RANGE.start(),
            RATING_RANGE.end()
        )));
    }

    let result = sqlx::query("UPDATE learning_plans SET rating = ? WHERE guid = ? AND user_id = ?")
        .bind(rating)
        .bind(plan_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Learning plan {}", plan_id)));
    }
    Ok(())
}

/// Every plan with its owner's email, optionally filtered by a
/// case-insensitive title substring
pub async fn list_all_plans(
    pool: &SqlitePool,
    title_filter: Option<&str>,
) -> Result<Vec<PlanOverview>> {
    let rows = sqlx::query_as::<_, PlanOverview>(
        "SELECT u.email AS user_email, p.title AS title, p.rating AS rating
         FROM learning_plans p
         JOIN users u ON u.guid = p.user_id
         ORDER BY u.email ASC, p.created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(match normalized_filter(title_filter) {
        Some(needle) => rows
            .into_iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect(),
        None => rows,
    })
}

/// Tick or untick one action item checkbox
pub async fn set_progress(
    pool: &SqlitePool,
    plan_id: &str,
    week_index: i64,
    item_index: i64,
    completed: bool,
) -> Result<()> {
    if week_index < 0 || item_index < 0 {
        return Err(Error::InvalidInput("Progress indices must be non-negative".to_string()));
    }

    sqlx::query(
        "INSERT INTO plan_progress (plan_id, week_index, item_index, completed, updated_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT (plan_id, week_index, item_index)
         DO UPDATE SET completed = excluded.completed, updated_at = excluded.updated_at",
    )
    .bind(plan_id)
    .bind(week_index)
    .bind(item_index)
    .bind(completed)
    .bind(now_timestamp())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn progress_for_plan(pool: &SqlitePool, plan_id: &str) -> Result<Vec<ProgressEntry>> {
    let rows = sqlx::query_as::<_, ProgressEntry>(
        "SELECT week_index, item_index, completed FROM plan_progress
         WHERE plan_id = ?
         ORDER BY week_index, item_index",
    )
    .bind(plan_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
