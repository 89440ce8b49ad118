//! Issue reports submitted from the plan view

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::{now_timestamp, Report};
use crate::{Error, Result};

/// Email recorded when the reporter is unknown
pub const UNKNOWN_REPORTER: &str = "unknown";

pub async fn insert_report(pool: &SqlitePool, email: Option<&str>, description: &str) -> Result<Report> {
    let description = description.trim();
    if description.is_empty() {
        return Err(Error::InvalidInput("Describe the issue before submitting".to_string()));
    }

    let report = Report {
        guid: Uuid::new_v4().to_string(),
        email: email.unwrap_or(UNKNOWN_REPORTER).to_string(),
        description: description.to_string(),
        timestamp: now_timestamp(),
    };

    sqlx::query("INSERT INTO reports (guid, email, description, timestamp) VALUES (?, ?, ?, ?)")
        .bind(&report.guid)
        .bind(&report.email)
        .bind(&report.description)
        .bind(&report.timestamp)
        .execute(pool)
        .await?;

    info!(report_id = %report.guid, "Issue reported by {}", report.email);
    Ok(report)
}

/// All reports, newest first
pub async fn list_reports(pool: &SqlitePool) -> Result<Vec<Report>> {
    let rows = sqlx::query_as::<_, Report>("SELECT * FROM reports ORDER BY timestamp DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
