//! Common error types for LPG

use thiserror::Error;

/// Common result type for LPG operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across LPG services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored plan could not be (de)serialized
    #[error("Plan serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Email already registered
    #[error("An account already exists for {0}")]
    DuplicateEmail(String),

    /// Login rejected
    #[error("Invalid email or password")]
    InvalidCredentials,
}
