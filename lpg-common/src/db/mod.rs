//! Database models and queries

pub mod init;
pub mod models;
pub mod plans;
pub mod reports;
pub mod sessions;
pub mod stats;
pub mod users;

pub use init::*;
pub use models::*;
pub use plans::*;
pub use reports::*;
pub use sessions::*;
pub use stats::*;
pub use users::*;

/// UTC timestamp in RFC 3339 form, as stored in every `*_at` column
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
