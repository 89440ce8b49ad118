//! Admin dashboard aggregates

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use super::{DashboardStats, SignupCount};
use crate::Result;

pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats> {
    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let total_plans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM learning_plans")
        .fetch_one(pool)
        .await?;

    let average_rating: Option<f64> =
        sqlx::query_scalar("SELECT AVG(rating) FROM learning_plans WHERE rating IS NOT NULL")
            .fetch_one(pool)
            .await?;

    let created: Vec<String> = sqlx::query_scalar("SELECT created_at FROM users")
        .fetch_all(pool)
        .await?;

    Ok(DashboardStats {
        total_users,
        total_plans,
        average_rating,
        signups: signups_per_day(created.iter().map(String::as_str)),
    })
}

/// Count signups per calendar date; unparseable timestamps are skipped
pub fn signups_per_day<'a>(timestamps: impl IntoIterator<Item = &'a str>) -> Vec<SignupCount> {
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for ts in timestamps {
        if let Some(date) = parse_date(ts) {
            *per_day.entry(date).or_insert(0) += 1;
        }
    }
    per_day
        .into_iter()
        .map(|(date, count)| SignupCount {
            date: date.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

fn parse_date(ts: &str) -> Option<NaiveDate> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}
