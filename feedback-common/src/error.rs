//! Common error types for the feedback analyzer

use thiserror::Error;

/// Common result type for feedback analyzer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the workspace crates
#[derive(Error, Debug)]
pub enum Error {
    /// Feedback table query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Config file unreadable, or a setting out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// Value outside an accepted set (e.g. an unknown sentiment label)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
