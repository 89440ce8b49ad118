//! Database models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub guid: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub phone: Option<String>,
    pub time_spent: i64,
    pub created_at: String,
}

/// Stored learning plan; `plan` holds the plan document as JSON text
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanRecord {
    pub guid: String,
    pub user_id: String,
    pub title: String,
    pub plan: String,
    pub rating: Option<i64>,
    pub created_at: String,
}

/// Sidebar entry for a user's saved plans
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanSummary {
    pub guid: String,
    pub title: String,
    pub rating: Option<i64>,
    pub created_at: String,
}

/// Completion state of one action item checkbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProgressEntry {
    pub week_index: i64,
    pub item_index: i64,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Report {
    pub guid: String,
    pub email: String,
    pub description: String,
    pub timestamp: String,
}

/// Admin users table row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserOverview {
    pub email: String,
    pub phone: Option<String>,
    pub plan_count: i64,
}

/// Admin learning plans table row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanOverview {
    pub user_email: String,
    pub title: String,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupCount {
    /// Calendar date (YYYY-MM-DD, UTC)
    pub date: String,
    pub count: i64,
}

/// Admin dashboard headline metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_plans: i64,
    pub average_rating: Option<f64>,
    pub signups: Vec<SignupCount>,
}

impl DashboardStats {
    /// Average rating with two decimals, or "N/A" when nothing is rated
    pub fn average_rating_display(&self) -> String {
        match self.average_rating {
            Some(avg) => format!("{:.2}", avg),
            None => "N/A".to_string(),
        }
    }
}
