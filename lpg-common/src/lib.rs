//! # LPG Common Library
//!
//! Shared code for the LPG services including:
//! - Learning plan model and LLM reply parsing
//! - Database schema and queries
//! - Configuration loading
//! - Credential hashing and session tokens
//! - HTML escaping and cookie helpers

pub mod auth;
pub mod config;
pub mod cookies;
pub mod db;
pub mod error;
pub mod html;
pub mod plan;

pub use error::{Error, Result};
pub use plan::{ExpertiseLevel, LearningPlan, LearningStyle, PlanRequest, Timeline};
