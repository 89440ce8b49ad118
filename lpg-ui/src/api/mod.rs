//! HTTP handlers for lpg-ui

pub mod auth;
pub mod health;
pub mod plans;
pub mod reports;
pub mod ui;

pub use auth::auth_routes;
pub use health::health_routes;
pub use plans::plan_routes;
pub use reports::report_routes;
