//! HTTP handlers for lpg-admin

pub mod auth;
pub mod health;
pub mod overview;
pub mod ui;

pub use auth::auth_routes;
pub use health::health_routes;
pub use overview::{
    dashboard_json, dashboard_page, plans_json, plans_page, reports_json, reports_page, root,
    users_json, users_page,
};
